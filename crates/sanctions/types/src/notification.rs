//! Notification decisions consulted before dispatch

use serde::{Deserialize, Serialize};

/// Outcome of the suppression check for one outgoing notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NotificationDecision {
    /// Deliver as usual
    #[default]
    Continue,
    /// Drop the notification
    Suppress,
    /// Drop the notification, but still mark the page as updated for its
    /// watchers so their unread markers stay consistent
    SuppressWithCompensation,
}

impl NotificationDecision {
    pub fn suppresses(&self) -> bool {
        !matches!(self, NotificationDecision::Continue)
    }

    pub fn needs_compensation(&self) -> bool {
        matches!(self, NotificationDecision::SuppressWithCompensation)
    }
}
