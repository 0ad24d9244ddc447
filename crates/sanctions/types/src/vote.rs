//! Votes and tallies
//!
//! Votes live in the discussion thread as replies carrying an agree or
//! disagree marker. They are never stored here; a tally is always a full
//! recomputation over the thread as read at `counted_at`.

use crate::Actor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position taken by a voter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    /// In favour, optionally proposing a block length in days
    Agree { days: Option<u32> },
    /// Against
    Disagree,
}

impl Stance {
    pub fn is_agree(&self) -> bool {
        matches!(self, Stance::Agree { .. })
    }
}

/// A single vote extracted from a thread reply
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: Actor,
    pub stance: Stance,
    pub cast_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(voter: Actor, stance: Stance, cast_at: DateTime<Utc>) -> Self {
        Self {
            voter,
            stance,
            cast_at,
        }
    }
}

/// Aggregated vote counts for a sanction
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub agree: u32,
    pub disagree: u32,
    /// Block lengths proposed by agreeing voters, sorted ascending
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agree_days: Vec<u32>,
    /// When the underlying replies were read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counted_at: Option<DateTime<Utc>>,
}

impl VoteTally {
    /// Build a tally from one effective vote per voter
    pub fn from_votes<'a>(
        votes: impl IntoIterator<Item = &'a Vote>,
        counted_at: DateTime<Utc>,
    ) -> Self {
        let mut tally = Self {
            counted_at: Some(counted_at),
            ..Self::default()
        };
        for vote in votes {
            match vote.stance {
                Stance::Agree { days } => {
                    tally.agree += 1;
                    if let Some(days) = days {
                        tally.agree_days.push(days);
                    }
                }
                Stance::Disagree => tally.disagree += 1,
            }
        }
        tally.agree_days.sort_unstable();
        tally
    }

    /// Total number of counted voters
    pub fn total(&self) -> u32 {
        self.agree + self.disagree
    }

    /// Whether the counts match, ignoring when they were read
    pub fn same_counts(&self, other: &VoteTally) -> bool {
        self.agree == other.agree
            && self.disagree == other.disagree
            && self.agree_days == other.agree_days
    }
}
