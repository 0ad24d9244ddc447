//! Pass policies: turning a frozen tally into a verdict
//!
//! What counts as "passed" is community policy, so it is a trait. The
//! default majority policy is driven by configuration.

use crate::config::VotingConfig;
use crate::messages::{self, keys, MessageSource};
use sanctions_types::{Sanction, SanctionType, Verdict, VoteTally};
use std::sync::Arc;
use tracing::warn;

/// Computes the verdict of an expired sanction
pub trait PassPolicy: Send + Sync {
    fn verdict(&self, sanction: &Sanction) -> Verdict;
}

/// Simple-majority policy with a quorum.
///
/// A sanction passes when at least `minimum_votes` voters were counted and
/// the agreeing share strictly exceeds `agree_percent`. For blocks, the
/// decided length is the lower median of the lengths named by agreeing
/// voters (the proposal's own length when nobody named one), capped by the
/// configured maximum block period.
pub struct MajorityPolicy {
    minimum_votes: u32,
    agree_percent: u32,
    messages: Arc<dyn MessageSource>,
}

impl MajorityPolicy {
    pub fn new(minimum_votes: u32, agree_percent: u32, messages: Arc<dyn MessageSource>) -> Self {
        Self {
            minimum_votes,
            agree_percent,
            messages,
        }
    }

    pub fn from_config(voting: &VotingConfig, messages: Arc<dyn MessageSource>) -> Self {
        Self::new(voting.minimum_votes, voting.agree_percent, messages)
    }

    fn passes(&self, tally: &VoteTally) -> bool {
        let total = u64::from(tally.total());
        total >= u64::from(self.minimum_votes)
            && u64::from(tally.agree) * 100 > u64::from(self.agree_percent) * total
    }

    /// Upper bound on block length in days; `None` when unbounded or unset
    fn max_block_days(&self) -> Option<u32> {
        let text = messages::require(self.messages.as_ref(), keys::MAX_BLOCK_PERIOD).ok()?;
        match text.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(days) => Some(days),
            Err(_) => {
                warn!(value = %text, "Maximum block period is not a number");
                None
            }
        }
    }

    fn block_days(&self, proposed: u32, tally: &VoteTally) -> u32 {
        let named = &tally.agree_days;
        let decided = if named.is_empty() {
            proposed
        } else {
            named[(named.len() - 1) / 2]
        };
        match self.max_block_days() {
            Some(max) => decided.min(max),
            None => decided,
        }
    }
}

impl PassPolicy for MajorityPolicy {
    fn verdict(&self, sanction: &Sanction) -> Verdict {
        let tally = &sanction.tally;
        if !self.passes(tally) {
            return Verdict::failed(tally);
        }

        let block_days = match &sanction.sanction_type {
            SanctionType::Block { days } => Some(self.block_days(*days, tally)),
            SanctionType::InsultingName { .. } => None,
        };

        Verdict {
            passed: true,
            agree: tally.agree,
            disagree: tally.disagree,
            block_days,
        }
    }
}
