//! Entry points into the sanctions special page
//!
//! Only the targets and labels are computed here; rendering them is up to
//! the host skin.

use crate::messages::MessageSource;
use crate::vote_right::VoteRightGate;
use sanctions_types::Actor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Label message names
pub mod labels {
    pub const USER_TOOL: &str = "sanctions-link-on-user-tool";
    pub const DIFF: &str = "sanctions-link-on-diff";
    pub const HISTORY: &str = "sanctions-link-on-history";
    pub const USER_PAGE: &str = "sanctions-link-on-user-page";
    pub const CONTRIBUTIONS: &str = "sanctions-link-on-user-contributes";
}

/// Toolbox entry id of the sanctions link
pub const TOOLBOX_ID: &str = "t-sanctions";

/// A link to a special-page subpage
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLink {
    /// Full target, e.g. `Special:Sanctions/Troll/41/42`
    pub target: String,
    pub label: String,
}

/// One item of a skin toolbox
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolboxEntry {
    pub key: String,
    pub id: String,
    pub link: ToolLink,
}

/// Computes which sanction links a viewer is offered
#[derive(Clone)]
pub struct Affordances {
    gate: VoteRightGate,
    messages: Arc<dyn MessageSource>,
    special_page: String,
}

impl Affordances {
    pub fn new(
        gate: VoteRightGate,
        messages: Arc<dyn MessageSource>,
        special_page: impl Into<String>,
    ) -> Self {
        Self {
            gate,
            messages,
            special_page: special_page.into(),
        }
    }

    fn link(&self, subpage: &str, label_key: &str) -> ToolLink {
        ToolLink {
            target: format!("{}/{}", self.special_page, subpage),
            label: self
                .messages
                .message(label_key)
                .unwrap_or_else(|| format!("<{label_key}>")),
        }
    }

    /// Link next to a user name
    pub fn user_tool(&self, viewer: Option<&Actor>, user: &str) -> Option<ToolLink> {
        self.gate
            .can_vote(viewer)
            .then(|| self.link(user, labels::USER_TOOL))
    }

    /// Link among the tools of a diff between `old_rev` and `new_rev`
    pub fn diff_tool(
        &self,
        viewer: Option<&Actor>,
        author: &str,
        old_rev: Option<u64>,
        new_rev: u64,
    ) -> Option<ToolLink> {
        if !self.gate.can_vote(viewer) {
            return None;
        }
        let subpage = match old_rev {
            Some(old) => format!("{author}/{old}/{new_rev}"),
            None => format!("{author}/{new_rev}"),
        };
        Some(self.link(&subpage, labels::DIFF))
    }

    /// Link among the tools of a history row
    pub fn history_tool(&self, viewer: Option<&Actor>, author: &str, rev: u64) -> Option<ToolLink> {
        self.gate
            .can_vote(viewer)
            .then(|| self.link(&format!("{author}/{rev}"), labels::HISTORY))
    }

    /// Insert the sanctions entry into a toolbox about `relevant_user`.
    ///
    /// The entry goes after `blockip` when present, else after `log`, else
    /// at the end.
    pub fn insert_toolbox(&self, toolbox: &mut Vec<ToolboxEntry>, relevant_user: Option<&str>) {
        let Some(user) = relevant_user else {
            return;
        };
        let entry = ToolboxEntry {
            key: "sanctions".to_string(),
            id: TOOLBOX_ID.to_string(),
            link: self.link(user, labels::USER_PAGE),
        };

        let anchor = toolbox
            .iter()
            .position(|e| e.key == "blockip")
            .or_else(|| toolbox.iter().position(|e| e.key == "log"));
        match anchor {
            Some(i) => toolbox.insert(i + 1, entry),
            None => toolbox.push(entry),
        }
    }

    /// Link among a user's contributions tools; always offered
    pub fn contributions_tool(&self, user: &str) -> ToolLink {
        self.link(user, labels::CONTRIBUTIONS)
    }
}
