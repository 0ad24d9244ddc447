//! Content-language messages consumed by the runtime
//!
//! Every named value (agent name, board page, template titles, block bound)
//! is looked up through a [`MessageSource`] on each call. Nothing is cached,
//! so a changed message takes effect on the next evaluation.

use sanctions_types::{SanctionError, SanctionResult};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::warn;

/// Message names
pub mod keys {
    pub const BOT_NAME: &str = "sanctions-bot-name";
    pub const DISCUSSION_PAGE_NAME: &str = "sanctions-discussion-page-name";
    pub const AGREE_TEMPLATE_TITLE: &str = "sanctions-agree-template-title";
    pub const DISAGREE_TEMPLATE_TITLE: &str = "sanctions-disagree-template-title";
    pub const INSULTING_NAME_TOPIC_TITLE: &str = "sanctions-type-insulting-name";
    pub const MAX_BLOCK_PERIOD: &str = "sanctions-max-block-period";
}

/// Lookup of messages in the content language
pub trait MessageSource: Send + Sync {
    /// The message text, or `None` when the message is not defined
    fn message(&self, key: &str) -> Option<String>;
}

/// Look up a message that must be present.
///
/// A missing or blank message is logged loudly, since it silently disables
/// suppression and gating otherwise.
pub fn require(source: &dyn MessageSource, key: &str) -> SanctionResult<String> {
    match source.message(key) {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => {
            warn!(key = key, "Required sanctions message is missing");
            Err(SanctionError::ConfigurationMissing(key.to_string()))
        }
    }
}

/// Message source backed by an in-process table
#[derive(Debug, Default)]
pub struct StaticMessages {
    messages: RwLock<HashMap<String, String>>,
}

impl StaticMessages {
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self {
            messages: RwLock::new(messages),
        }
    }

    /// Define or replace a message
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut messages) = self.messages.write() {
            messages.insert(key.into(), value.into());
        }
    }

    /// Remove a message
    pub fn unset(&self, key: &str) {
        if let Ok(mut messages) = self.messages.write() {
            messages.remove(key);
        }
    }
}

impl MessageSource for StaticMessages {
    fn message(&self, key: &str) -> Option<String> {
        self.messages
            .read()
            .ok()
            .and_then(|messages| messages.get(key).cloned())
    }
}
