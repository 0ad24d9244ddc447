use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sanctions_types::{Actor, Sanction, SanctionError, SanctionResult, TopicId, Verdict};

use crate::traits::{Clock, EnactmentTrigger, VoteRightProvider};

/// Mock clock for testing.
///
/// Starts at a fixed instant and only moves when told to.
pub struct MockClock {
    now: Mutex<DateTime<Utc>>,
}

impl MockClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now = *now + by;
        }
    }

    pub fn set(&self, to: DateTime<Utc>) {
        if let Ok(mut now) = self.now.lock() {
            *now = to;
        }
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|now| *now).unwrap_or_else(|_| Utc::now())
    }
}

/// Mock vote-right provider for testing.
///
/// Stores the set of account names holding the vote right.
#[derive(Default)]
pub struct MockVoteRights {
    voters: Mutex<HashSet<String>>,
}

impl MockVoteRights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant the vote right to an account.
    pub fn grant(&self, name: impl Into<String>) {
        if let Ok(mut voters) = self.voters.lock() {
            voters.insert(name.into());
        }
    }

    pub fn revoke(&self, name: &str) {
        if let Ok(mut voters) = self.voters.lock() {
            voters.remove(name);
        }
    }
}

impl VoteRightProvider for MockVoteRights {
    fn has_vote_right(&self, actor: &Actor) -> bool {
        self.voters
            .lock()
            .map(|voters| voters.contains(&actor.name))
            .unwrap_or(false)
    }
}

/// Mock enactment trigger for testing.
///
/// Records every invocation; can be configured to fail.
#[derive(Default)]
pub struct MockEnactment {
    calls: Mutex<Vec<(TopicId, Verdict)>>,
    fail: Mutex<bool>,
}

impl MockEnactment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a trigger whose every invocation fails.
    pub fn failing() -> Self {
        let trigger = Self::default();
        trigger.set_failing(true);
        trigger
    }

    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut fail) = self.fail.lock() {
            *fail = failing;
        }
    }

    /// Invocations so far, oldest first.
    pub fn calls(&self) -> Vec<(TopicId, Verdict)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EnactmentTrigger for MockEnactment {
    async fn enact(&self, sanction: &Sanction, verdict: &Verdict) -> SanctionResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((sanction.topic, *verdict));
        }
        let failing = self.fail.lock().map(|fail| *fail).unwrap_or(false);
        if failing {
            return Err(SanctionError::Enactment(format!(
                "mock enactment refused {}",
                sanction.topic
            )));
        }
        Ok(())
    }
}
