//! Variables exported to the client-side sanction tools

use crate::messages::{keys, MessageSource};
use sanctions_types::{SanctionError, SanctionResult};
use serde::{Deserialize, Serialize};

/// Message-derived values the client scripts need to build votes and
/// proposals. Missing messages export as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfigVars {
    #[serde(rename = "wgSanctionsAgreeTemplate")]
    pub agree_template: String,
    #[serde(rename = "wgSanctionsDisagreeTemplate")]
    pub disagree_template: String,
    #[serde(rename = "wgSanctionsInsultingNameTopicTitle")]
    pub insulting_name_topic_title: String,
    /// Zero when unbounded or not a number
    #[serde(rename = "wgSanctionsMaxBlockPeriod")]
    pub max_block_period: u32,
}

impl ClientConfigVars {
    pub fn resolve(source: &dyn MessageSource) -> Self {
        let text = |key: &str| source.message(key).unwrap_or_default();
        Self {
            agree_template: text(keys::AGREE_TEMPLATE_TITLE),
            disagree_template: text(keys::DISAGREE_TEMPLATE_TITLE),
            insulting_name_topic_title: text(keys::INSULTING_NAME_TOPIC_TITLE),
            max_block_period: text(keys::MAX_BLOCK_PERIOD).trim().parse().unwrap_or(0),
        }
    }

    pub fn to_json(&self) -> SanctionResult<String> {
        serde_json::to_string(self).map_err(|e| SanctionError::Config(e.to_string()))
    }
}
