//! Collaborator interfaces
//!
//! The runtime owns no storage. Sanction records, thread replies, account
//! capabilities, watch lists and the enactment action all belong to the
//! host platform and are reached through these traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sanctions_types::{
    Actor, PageTitle, Sanction, SanctionReceipt, SanctionResult, ThreadReply, TopicId, Verdict,
    VoteTally,
};

/// Store of sanction records
#[async_trait]
pub trait SanctionStore: Send + Sync {
    /// Look up the sanction bound to a topic
    async fn get(&self, topic: &TopicId) -> SanctionResult<Option<Sanction>>;

    /// Register a newly opened sanction
    async fn insert(&self, sanction: Sanction) -> SanctionResult<()>;

    /// Overwrite the tally of an open sanction (last write wins).
    ///
    /// Must refuse the write once the record is expired.
    async fn store_tally(&self, topic: &TopicId, tally: VoteTally) -> SanctionResult<Sanction>;

    /// Flag the sanction as expired. Idempotent.
    async fn mark_expired(&self, topic: &TopicId) -> SanctionResult<Sanction>;

    /// Flag the sanction as enacted. Must refuse a record that is not expired.
    async fn mark_enacted(&self, topic: &TopicId) -> SanctionResult<Sanction>;

    /// Append a lifecycle receipt
    async fn append_receipt(&self, receipt: SanctionReceipt) -> SanctionResult<()>;

    /// Receipts recorded for a topic, oldest first
    async fn receipts_for(&self, topic: &TopicId) -> SanctionResult<Vec<SanctionReceipt>>;
}

/// Authoritative source of the replies (and thus votes) in a topic
#[async_trait]
pub trait VoteSource: Send + Sync {
    async fn replies(&self, topic: &TopicId) -> SanctionResult<Vec<ThreadReply>>;
}

/// The platform's "may vote on sanctions" capability check
pub trait VoteRightProvider: Send + Sync {
    fn has_vote_right(&self, actor: &Actor) -> bool;
}

/// Watch-list bookkeeping performed in place of a suppressed email
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    /// Mark `title` as changed at `at` for every watcher other than `editor`
    async fn update_notification_timestamp(
        &self,
        editor: &Actor,
        title: &PageTitle,
        at: DateTime<Utc>,
    ) -> SanctionResult<()>;
}

/// The external action carried out for a passed sanction.
///
/// Implementations must tolerate being invoked more than once for the same
/// sanction.
#[async_trait]
pub trait EnactmentTrigger: Send + Sync {
    async fn enact(&self, sanction: &Sanction, verdict: &Verdict) -> SanctionResult<()>;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
