//! Actors: the users (and the automated agent) acting on the platform

use serde::{Deserialize, Serialize};

/// Numeric account identifier on the hosting platform
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A platform user, or the system's own automated agent.
///
/// The agent is an ordinary account; it is only told apart by comparing its
/// display name with the configured agent name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    /// Display name (or address, for logged-out actors)
    pub name: String,
    /// Account id; `None` for logged-out actors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl Actor {
    /// A registered account
    pub fn user(id: u64, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_id: Some(UserId(id)),
        }
    }

    /// A logged-out actor, known only by name or address
    pub fn anonymous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_id: None,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.user_id.is_some()
    }

    /// Whether this actor carries the given display name
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
