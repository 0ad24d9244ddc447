//! In-memory collaborators for development and testing

use crate::traits::{SanctionStore, VoteSource, WatchlistStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sanctions_types::{
    Actor, PageTitle, Sanction, SanctionError, SanctionReceipt, SanctionResult, ThreadReply,
    TopicId, VoteTally,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory sanction store
#[derive(Debug, Default)]
pub struct InMemorySanctionStore {
    sanctions: Arc<RwLock<HashMap<TopicId, Sanction>>>,
    receipts: Arc<RwLock<Vec<SanctionReceipt>>>,
}

impl InMemorySanctionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F>(&self, topic: &TopicId, apply: F) -> SanctionResult<Sanction>
    where
        F: FnOnce(&mut Sanction) -> SanctionResult<()> + Send,
    {
        let mut sanctions = self.sanctions.write().await;
        let sanction = sanctions
            .get_mut(topic)
            .ok_or(SanctionError::UnresolvedSanction(*topic))?;
        apply(sanction)?;
        Ok(sanction.clone())
    }
}

#[async_trait]
impl SanctionStore for InMemorySanctionStore {
    async fn get(&self, topic: &TopicId) -> SanctionResult<Option<Sanction>> {
        let sanctions = self.sanctions.read().await;
        Ok(sanctions.get(topic).cloned())
    }

    async fn insert(&self, sanction: Sanction) -> SanctionResult<()> {
        let mut sanctions = self.sanctions.write().await;
        if sanctions.contains_key(&sanction.topic) {
            return Err(SanctionError::Storage(format!(
                "sanction already exists for topic {}",
                sanction.topic
            )));
        }
        sanctions.insert(sanction.topic, sanction);
        Ok(())
    }

    async fn store_tally(&self, topic: &TopicId, tally: VoteTally) -> SanctionResult<Sanction> {
        self.update(topic, |s| s.apply_tally(tally)).await
    }

    async fn mark_expired(&self, topic: &TopicId) -> SanctionResult<Sanction> {
        self.update(topic, |s| {
            s.mark_expired();
            Ok(())
        })
        .await
    }

    async fn mark_enacted(&self, topic: &TopicId) -> SanctionResult<Sanction> {
        self.update(topic, |s| s.mark_enacted()).await
    }

    async fn append_receipt(&self, receipt: SanctionReceipt) -> SanctionResult<()> {
        let mut receipts = self.receipts.write().await;
        receipts.push(receipt);
        Ok(())
    }

    async fn receipts_for(&self, topic: &TopicId) -> SanctionResult<Vec<SanctionReceipt>> {
        let receipts = self.receipts.read().await;
        Ok(receipts
            .iter()
            .filter(|r| r.topic == *topic)
            .cloned()
            .collect())
    }
}

/// In-memory topic replies, counting how often they are read
#[derive(Debug, Default)]
pub struct InMemoryVoteSource {
    threads: Arc<RwLock<HashMap<TopicId, Vec<ThreadReply>>>>,
    reads: AtomicUsize,
}

impl InMemoryVoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a reply to a topic
    pub async fn post(&self, topic: TopicId, reply: ThreadReply) {
        let mut threads = self.threads.write().await;
        threads.entry(topic).or_default().push(reply);
    }

    /// Number of times any thread was read
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoteSource for InMemoryVoteSource {
    async fn replies(&self, topic: &TopicId) -> SanctionResult<Vec<ThreadReply>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let threads = self.threads.read().await;
        Ok(threads.get(topic).cloned().unwrap_or_default())
    }
}

/// In-memory watch lists: page → watcher → pending notification timestamp
#[derive(Debug, Default)]
pub struct InMemoryWatchlist {
    entries: Arc<RwLock<HashMap<PageTitle, HashMap<String, Option<DateTime<Utc>>>>>>,
}

impl InMemoryWatchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `watcher` to the watchers of `title`
    pub async fn watch(&self, watcher: &str, title: &PageTitle) {
        let mut entries = self.entries.write().await;
        entries
            .entry(title.clone())
            .or_default()
            .entry(watcher.to_string())
            .or_insert(None);
    }

    /// Pending change timestamp for a watcher, if the page is marked unseen
    pub async fn notification_timestamp(
        &self,
        watcher: &str,
        title: &PageTitle,
    ) -> Option<DateTime<Utc>> {
        let entries = self.entries.read().await;
        entries
            .get(title)
            .and_then(|watchers| watchers.get(watcher).copied().flatten())
    }
}

#[async_trait]
impl WatchlistStore for InMemoryWatchlist {
    async fn update_notification_timestamp(
        &self,
        editor: &Actor,
        title: &PageTitle,
        at: DateTime<Utc>,
    ) -> SanctionResult<()> {
        let mut entries = self.entries.write().await;
        if let Some(watchers) = entries.get_mut(title) {
            for (watcher, timestamp) in watchers.iter_mut() {
                // An unseen change keeps its original timestamp
                if watcher != &editor.name && timestamp.is_none() {
                    *timestamp = Some(at);
                }
            }
        }
        Ok(())
    }
}
