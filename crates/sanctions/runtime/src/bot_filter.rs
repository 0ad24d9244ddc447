//! Bot action filter: keeps the sanction agent's own actions quiet
//!
//! Tallies and enactments are carried out by an automated account. Its
//! edits and events must not notify anyone, or every vote count would
//! produce a wave of emails. Two boundaries consult this filter:
//!
//! - **Email**: an agent edit is suppressed, but the watch-list "changed"
//!   marker the email would have set is still applied when the host tracks
//!   watch lists.
//! - **Events**: an event originated by the agent is dropped outright.
//!
//! An event or edit with no identifiable actor is never suppressed.

use crate::config::NotificationConfig;
use crate::messages::{self, keys, MessageSource};
use crate::traits::{Clock, WatchlistStore};
use sanctions_types::{Actor, NotificationDecision, PageTitle, SanctionResult, UserId};
use std::sync::Arc;
use tracing::debug;

/// Strategy recognizing the system's own agent
pub trait SystemAgentMatcher: Send + Sync {
    fn is_system_agent(&self, actor: Option<&Actor>) -> bool;
}

/// Matches the display name configured in the content language.
///
/// The name is looked up on every call. A missing name matches nobody.
pub struct LocalizedNameMatcher {
    messages: Arc<dyn MessageSource>,
}

impl LocalizedNameMatcher {
    pub fn new(messages: Arc<dyn MessageSource>) -> Self {
        Self { messages }
    }
}

impl SystemAgentMatcher for LocalizedNameMatcher {
    fn is_system_agent(&self, actor: Option<&Actor>) -> bool {
        let Some(actor) = actor else {
            return false;
        };
        match messages::require(self.messages.as_ref(), keys::BOT_NAME) {
            Ok(name) => actor.has_name(&name),
            Err(_) => false,
        }
    }
}

/// Matches a fixed account id
pub struct AccountIdMatcher {
    id: UserId,
}

impl AccountIdMatcher {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}

impl SystemAgentMatcher for AccountIdMatcher {
    fn is_system_agent(&self, actor: Option<&Actor>) -> bool {
        actor.and_then(|a| a.user_id) == Some(self.id)
    }
}

/// Decides whether notifications should go out
#[derive(Clone)]
pub struct BotActionFilter {
    matcher: Arc<dyn SystemAgentMatcher>,
    notifications: NotificationConfig,
}

impl BotActionFilter {
    pub fn new(matcher: Arc<dyn SystemAgentMatcher>, notifications: NotificationConfig) -> Self {
        Self {
            matcher,
            notifications,
        }
    }

    pub fn is_system_agent(&self, actor: Option<&Actor>) -> bool {
        self.matcher.is_system_agent(actor)
    }

    /// Decision for an email about an edit by `editor`
    pub fn email_decision(&self, editor: Option<&Actor>) -> NotificationDecision {
        if !self.is_system_agent(editor) {
            return NotificationDecision::Continue;
        }
        if self.notifications.tracks_watchlist() {
            NotificationDecision::SuppressWithCompensation
        } else {
            NotificationDecision::Suppress
        }
    }

    /// Decision for an event originated by `agent`
    pub fn event_decision(&self, agent: Option<&Actor>) -> NotificationDecision {
        if self.is_system_agent(agent) {
            NotificationDecision::Suppress
        } else {
            NotificationDecision::Continue
        }
    }
}

/// Applies filter decisions, including the watch-list compensation step
#[derive(Clone)]
pub struct NotificationBoundary {
    filter: BotActionFilter,
    watchlist: Arc<dyn WatchlistStore>,
    clock: Arc<dyn Clock>,
}

impl NotificationBoundary {
    pub fn new(
        filter: BotActionFilter,
        watchlist: Arc<dyn WatchlistStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            filter,
            watchlist,
            clock,
        }
    }

    pub fn filter(&self) -> &BotActionFilter {
        &self.filter
    }

    /// Run before an edit email is dispatched. Returns whether to send it.
    pub async fn before_email(
        &self,
        editor: Option<&Actor>,
        title: &PageTitle,
    ) -> SanctionResult<bool> {
        let decision = self.filter.email_decision(editor);

        if let (true, Some(editor)) = (decision.needs_compensation(), editor) {
            self.watchlist
                .update_notification_timestamp(editor, title, self.clock.now())
                .await?;
            debug!(title = %title, "Suppressed agent email, watch list updated");
        } else if decision.suppresses() {
            debug!(title = %title, "Suppressed agent email");
        }

        Ok(!decision.suppresses())
    }

    /// Run before an event is stored. Returns whether to keep it.
    pub fn before_event(&self, agent: Option<&Actor>) -> bool {
        let decision = self.filter.event_decision(agent);
        if decision.suppresses() {
            debug!("Suppressed agent event");
        }
        !decision.suppresses()
    }
}
