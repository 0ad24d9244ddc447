//! Page titles, thread classification and thread replies

use crate::{Actor, TopicId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized page title: optional namespace plus text.
///
/// Normalization follows the platform's title rules: surrounding whitespace
/// is trimmed, underscores become spaces and the first letter of both parts
/// is upper-cased.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageTitle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub text: String,
}

impl PageTitle {
    /// Parse a full title such as `Project talk:Sanctions` or `Topic:Sxyz`
    pub fn new(full: &str) -> Self {
        let full = full.trim().replace('_', " ");
        match full.split_once(':') {
            Some((ns, text)) if !ns.trim().is_empty() => Self {
                namespace: Some(capitalize_first(ns.trim())),
                text: capitalize_first(text.trim()),
            },
            _ => Self {
                namespace: None,
                text: capitalize_first(full.trim()),
            },
        }
    }

    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(capitalize_first(namespace).as_str())
    }

    /// Full title as displayed
    pub fn full_text(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}:{}", ns, self.text),
            None => self.text.clone(),
        }
    }
}

impl std::fmt::Display for PageTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_text())
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// What a viewed page is, as far as sanctions are concerned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadClass {
    /// The discussion board hosting all sanction proposals
    Board,
    /// A topic whose title carries a well-formed identifier
    Topic(TopicId),
    /// Anything else
    Other,
}

impl ThreadClass {
    pub fn topic(&self) -> Option<TopicId> {
        match self {
            ThreadClass::Topic(id) => Some(*id),
            _ => None,
        }
    }
}

/// A reply posted in a sanction topic
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadReply {
    pub author: Actor,
    /// Raw wikitext of the reply
    pub content: String,
    pub posted_at: DateTime<Utc>,
}

impl ThreadReply {
    pub fn new(author: Actor, content: impl Into<String>, posted_at: DateTime<Utc>) -> Self {
        Self {
            author,
            content: content.into(),
            posted_at,
        }
    }
}
