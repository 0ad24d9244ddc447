//! Configuration for the sanction runtime

use crate::messages::keys;
use sanctions_types::{SanctionError, SanctionResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanctionsConfig {
    /// Voting rules
    #[serde(default)]
    pub voting: VotingConfig,

    /// Notification settings shared with the host platform
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Content-language messages, keyed by message name
    #[serde(default = "default_messages")]
    pub messages: HashMap<String, String>,
}

impl Default for SanctionsConfig {
    fn default() -> Self {
        Self {
            voting: VotingConfig::default(),
            notifications: NotificationConfig::default(),
            logging: LoggingConfig::default(),
            messages: default_messages(),
        }
    }
}

/// Voting rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingConfig {
    /// Fewest counted voters for a vote to pass
    #[serde(default = "default_minimum_votes")]
    pub minimum_votes: u32,

    /// Share of agreeing voters (in percent) that must be exceeded
    #[serde(default = "default_agree_percent")]
    pub agree_percent: u32,

    /// Namespace of discussion topic pages
    #[serde(default = "default_topic_namespace")]
    pub topic_namespace: String,

    /// Special page listing sanctions, target of board redirects and tool links
    #[serde(default = "default_special_page")]
    pub special_page: String,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            minimum_votes: default_minimum_votes(),
            agree_percent: default_agree_percent(),
            topic_namespace: default_topic_namespace(),
            special_page: default_special_page(),
        }
    }
}

/// Host notification settings that decide whether suppressed emails still
/// update watch-list markers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Email watchers on page changes (`EnotifWatchlist`)
    #[serde(default)]
    pub enotif_watchlist: bool,

    /// Show "updated since last visit" markers (`ShowUpdatedMarker`)
    #[serde(default)]
    pub show_updated_marker: bool,
}

impl NotificationConfig {
    pub fn tracks_watchlist(&self) -> bool {
        self.enotif_watchlist || self.show_updated_marker
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_minimum_votes() -> u32 {
    3
}

fn default_agree_percent() -> u32 {
    50
}

fn default_topic_namespace() -> String {
    "Topic".to_string()
}

fn default_special_page() -> String {
    "Special:Sanctions".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_messages() -> HashMap<String, String> {
    [
        (keys::BOT_NAME, "Sanction Bot"),
        (keys::DISCUSSION_PAGE_NAME, "Project talk:Sanctions"),
        (keys::AGREE_TEMPLATE_TITLE, "Sanctions-agree"),
        (keys::DISAGREE_TEMPLATE_TITLE, "Sanctions-disagree"),
        (keys::INSULTING_NAME_TOPIC_TITLE, "Insulting name"),
        (keys::MAX_BLOCK_PERIOD, "30"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl SanctionsConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> SanctionResult<Self> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(
            config::Config::try_from(&SanctionsConfig::default())
                .map_err(|e| SanctionError::Config(e.to_string()))?,
        );

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Add environment variables with SANCTIONS_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("SANCTIONS")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| SanctionError::Config(e.to_string()))
    }
}
