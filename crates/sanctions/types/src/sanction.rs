//! Sanction records and their lifecycle
//!
//! A sanction moves `Open → Expired → Enacted?`. Expiry is monotonic, the
//! tally is frozen from the moment the record is marked expired, and
//! enactment is only reachable from the expired state. The mutators below
//! refuse any write that would break those rules.

use crate::{SanctionError, SanctionResult, TopicId, VoteTally};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of measure a sanction proposes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SanctionType {
    /// Forced rename of an insulting account name
    InsultingName { original_name: String },
    /// Block of the subject for a proposed number of days
    Block { days: u32 },
}

impl SanctionType {
    pub fn is_block(&self) -> bool {
        matches!(self, SanctionType::Block { .. })
    }
}

/// Coarse lifecycle state of a sanction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SanctionState {
    /// Voting window open, tally may still change
    #[default]
    Open,
    /// Voting closed, tally frozen
    Expired,
    /// Passed and carried out
    Enacted,
}

/// A community sanction bound to one discussion topic
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sanction {
    /// Topic hosting the vote
    pub topic: TopicId,
    /// Name of the actor the sanction targets
    pub subject: String,
    /// Name of the actor who opened the proposal
    pub proposer: String,
    pub sanction_type: SanctionType,
    pub created_at: DateTime<Utc>,
    /// End of the voting window
    pub deadline: DateTime<Utc>,
    pub tally: VoteTally,
    pub expired: bool,
    pub enacted: bool,
}

impl Sanction {
    pub fn new(
        topic: TopicId,
        subject: impl Into<String>,
        proposer: impl Into<String>,
        sanction_type: SanctionType,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            topic,
            subject: subject.into(),
            proposer: proposer.into(),
            sanction_type,
            created_at: Utc::now(),
            deadline,
            tally: VoteTally::default(),
            expired: false,
            enacted: false,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_tally(mut self, tally: VoteTally) -> Self {
        self.tally = tally;
        self
    }

    pub fn state(&self) -> SanctionState {
        match (self.expired, self.enacted) {
            (_, true) => SanctionState::Enacted,
            (true, false) => SanctionState::Expired,
            (false, false) => SanctionState::Open,
        }
    }

    /// Replace the tally. Refused once the record is expired.
    pub fn apply_tally(&mut self, tally: VoteTally) -> SanctionResult<()> {
        if self.expired {
            return Err(SanctionError::InvalidTransition {
                topic: self.topic,
                reason: "tally is frozen after expiry".into(),
            });
        }
        self.tally = tally;
        Ok(())
    }

    /// Mark the voting window closed. Returns whether this call changed state.
    pub fn mark_expired(&mut self) -> bool {
        let changed = !self.expired;
        self.expired = true;
        changed
    }

    /// Record that the sanction was carried out
    pub fn mark_enacted(&mut self) -> SanctionResult<()> {
        if !self.expired {
            return Err(SanctionError::InvalidTransition {
                topic: self.topic,
                reason: "cannot enact before expiry".into(),
            });
        }
        self.enacted = true;
        Ok(())
    }
}

/// Outcome of a closed vote, as decided by the configured pass policy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub passed: bool,
    pub agree: u32,
    pub disagree: u32,
    /// Block length carried by the vote, for block sanctions that passed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_days: Option<u32>,
}

impl Verdict {
    pub fn failed(tally: &VoteTally) -> Self {
        Self {
            passed: false,
            agree: tally.agree,
            disagree: tally.disagree,
            block_days: None,
        }
    }
}
