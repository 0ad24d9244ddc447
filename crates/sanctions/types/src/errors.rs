//! Error types for the sanction layer

use crate::TopicId;

/// Errors that can occur in sanction operations
#[derive(Debug, thiserror::Error)]
pub enum SanctionError {
    /// Malformed topic token. Recovered locally as "not a sanction topic".
    #[error("Invalid topic identifier: {0}")]
    InvalidIdentifier(String),

    /// Well-formed identifier with no sanction behind it.
    #[error("No sanction for topic: {0}")]
    UnresolvedSanction(TopicId),

    /// Tally refresh requested for a sanction whose window has closed.
    /// This is a caller defect, not a runtime condition.
    #[error("Refresh requested for expired sanction: {0}")]
    RefreshAfterExpiry(TopicId),

    #[error("Required configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Invalid transition for {topic}: {reason}")]
    InvalidTransition { topic: TopicId, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Enactment failed: {0}")]
    Enactment(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SanctionError {
    /// Whether the error only means "this is not a sanction topic".
    ///
    /// Such errors are never shown to end users.
    pub fn is_not_a_topic(&self) -> bool {
        matches!(
            self,
            SanctionError::InvalidIdentifier(_) | SanctionError::UnresolvedSanction(_)
        )
    }

    /// Whether the error signals a contract violation by the caller
    pub fn is_misuse(&self) -> bool {
        matches!(self, SanctionError::RefreshAfterExpiry(_))
    }
}

/// Result type alias for sanction operations
pub type SanctionResult<T> = Result<T, SanctionError>;
