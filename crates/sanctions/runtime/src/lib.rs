//! Sanction Runtime
//!
//! This crate drives community sanctions through their lifecycle. It owns
//! no storage and runs no background work: every step is taken while the
//! host handles a page view or is about to send a notification.
//!
//! # Architecture
//!
//! The [`SanctionOrchestrator`] is the main entry point. It composes:
//!
//! - [`TopicResolver`]: classifies viewed pages and binds topics to sanctions
//! - [`VoteRightGate`]: who may vote (and see the voting controls)
//! - [`ExpirationEvaluator`]: whether a voting window has closed
//! - [`VoteTallyEngine`]: recomputes tallies from thread replies
//! - [`PassPolicy`]: turns a frozen tally into a verdict
//! - [`EnactmentTrigger`]: the host action run for a passed sanction
//!
//! The [`NotificationBoundary`] sits in front of the host's email and event
//! dispatch and keeps the sanction agent's own actions quiet.
//!
//! # Example
//!
//! ```rust
//! use sanctions_runtime::*;
//! use sanctions_types::{SanctionType, ThreadClass, TopicId};
//! use std::sync::Arc;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let config = SanctionsConfig::default();
//!     let store = Arc::new(InMemorySanctionStore::new());
//!     let orchestrator = SanctionOrchestrator::from_config(
//!         &config,
//!         Collaborators {
//!             store: store.clone(),
//!             votes: Arc::new(InMemoryVoteSource::new()),
//!             vote_rights: Arc::new(MockVoteRights::new()),
//!             enactment: Arc::new(MockEnactment::new()),
//!             messages: Arc::new(StaticMessages::new(config.messages.clone())),
//!             clock: Arc::new(SystemClock),
//!         },
//!     );
//!
//!     let outcome = orchestrator
//!         .on_page_view(&ViewRequest::new("Topic:Abc123", None))
//!         .await
//!         .unwrap();
//!     assert_eq!(outcome.class, ThreadClass::Topic(TopicId::parse("abc123").unwrap()));
//!     assert!(outcome.topic.is_none());
//! });
//! ```

#![deny(unsafe_code)]

pub mod affordances;
pub mod bot_filter;
pub mod client_config;
pub mod config;
pub mod expiration;
pub mod memory;
pub mod messages;
pub mod mocks;
pub mod orchestrator;
pub mod policy;
pub mod resolver;
pub mod tally;
pub mod telemetry;
pub mod traits;
pub mod vote_right;

// Re-export main types for convenience
pub use affordances::{Affordances, ToolLink, ToolboxEntry};
pub use bot_filter::{
    AccountIdMatcher, BotActionFilter, LocalizedNameMatcher, NotificationBoundary,
    SystemAgentMatcher,
};
pub use client_config::ClientConfigVars;
pub use config::{LoggingConfig, NotificationConfig, SanctionsConfig, VotingConfig};
pub use expiration::{is_expired_at, ExpirationEvaluator};
pub use memory::{InMemorySanctionStore, InMemoryVoteSource, InMemoryWatchlist};
pub use messages::{keys, MessageSource, StaticMessages};
pub use mocks::{MockClock, MockEnactment, MockVoteRights};
pub use orchestrator::{
    Collaborators, SanctionOrchestrator, TopicView, ViewOutcome, ViewRequest, BOARD_MODULE,
    TOPIC_MODULE,
};
pub use policy::{MajorityPolicy, PassPolicy};
pub use resolver::TopicResolver;
pub use tally::{VoteMarkers, VoteTallyEngine};
pub use telemetry::init_tracing;
pub use traits::{
    Clock, EnactmentTrigger, SanctionStore, SystemClock, VoteRightProvider, VoteSource,
    WatchlistStore,
};
pub use vote_right::VoteRightGate;
