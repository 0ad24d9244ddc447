//! Topic resolver: classifies pages and binds topics to sanctions
//!
//! Classification is a single explicit step: a viewed title is either the
//! sanctions board, a topic carrying a well-formed identifier, or something
//! else. Resolution then looks the identifier up; "no sanction" is an
//! ordinary outcome, not an error.

use crate::messages::{self, keys, MessageSource};
use crate::traits::SanctionStore;
use sanctions_types::{PageTitle, Sanction, SanctionResult, ThreadClass, TopicId};
use std::sync::Arc;
use tracing::debug;

/// Resolves page titles to sanction records
#[derive(Clone)]
pub struct TopicResolver {
    store: Arc<dyn SanctionStore>,
    messages: Arc<dyn MessageSource>,
    topic_namespace: String,
}

impl TopicResolver {
    pub fn new(
        store: Arc<dyn SanctionStore>,
        messages: Arc<dyn MessageSource>,
        topic_namespace: impl Into<String>,
    ) -> Self {
        Self {
            store,
            messages,
            topic_namespace: topic_namespace.into(),
        }
    }

    /// Title of the board hosting sanction proposals, if configured
    pub fn board_title(&self) -> Option<PageTitle> {
        messages::require(self.messages.as_ref(), keys::DISCUSSION_PAGE_NAME)
            .ok()
            .map(|name| PageTitle::new(&name))
    }

    /// Classify a viewed page
    pub fn classify(&self, title: &PageTitle) -> ThreadClass {
        if self.board_title().as_ref() == Some(title) {
            return ThreadClass::Board;
        }

        if !title.in_namespace(&self.topic_namespace) {
            return ThreadClass::Other;
        }

        match TopicId::try_parse(&title.text) {
            Ok(id) => ThreadClass::Topic(id),
            Err(e) => {
                debug!(title = %title, error = %e, "Topic title is not an identifier");
                ThreadClass::Other
            }
        }
    }

    /// Look up the sanction bound to a topic
    pub async fn resolve(&self, topic: &TopicId) -> SanctionResult<Option<Sanction>> {
        let sanction = self.store.get(topic).await?;
        if sanction.is_none() {
            debug!(topic = %topic, "Topic is not about a sanction");
        }
        Ok(sanction)
    }

    /// Classify and resolve in one go
    pub async fn resolve_title(&self, title: &PageTitle) -> SanctionResult<Option<Sanction>> {
        match self.classify(title) {
            ThreadClass::Topic(id) => self.resolve(&id).await,
            ThreadClass::Board | ThreadClass::Other => Ok(None),
        }
    }
}
