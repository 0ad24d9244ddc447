//! Lifecycle receipts: the audit trail of sanction transitions

use crate::TopicId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of transition a receipt records
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptKind {
    /// Tally recomputed while open
    Refreshed,
    /// Voting window closed
    Expired,
    /// Passed sanction handed to the enactment subsystem
    Enacted,
}

/// A receipt for one lifecycle transition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SanctionReceipt {
    /// Unique receipt identifier
    pub receipt_id: String,
    pub topic: TopicId,
    pub kind: ReceiptKind,
    /// Human-readable description
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl SanctionReceipt {
    pub fn new(
        topic: TopicId,
        kind: ReceiptKind,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            receipt_id: uuid::Uuid::new_v4().to_string(),
            topic,
            kind,
            description: description.into(),
            timestamp,
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
