//! Sanction orchestrator: the page-view driven lifecycle
//!
//! There is no scheduler. Every view of the board or of a sanction topic
//! advances the state machine as far as it can go:
//!
//! ```text
//! Open --refresh--> Open
//! Open --deadline elapses--> Expired --passed + enacted--> Enacted
//! ```
//!
//! An open sanction is refreshed exactly once per view. An expired one is
//! frozen, judged by the [`PassPolicy`] and, when passed, handed to the
//! [`EnactmentTrigger`]. A failed enactment leaves the record expired so
//! the next view retries it.

use crate::affordances::Affordances;
use crate::bot_filter::{
    BotActionFilter, LocalizedNameMatcher, NotificationBoundary, SystemAgentMatcher,
};
use crate::client_config::ClientConfigVars;
use crate::config::{NotificationConfig, SanctionsConfig};
use crate::expiration::ExpirationEvaluator;
use crate::messages::MessageSource;
use crate::policy::{MajorityPolicy, PassPolicy};
use crate::resolver::TopicResolver;
use crate::tally::VoteTallyEngine;
use crate::traits::{
    Clock, EnactmentTrigger, SanctionStore, VoteRightProvider, VoteSource, WatchlistStore,
};
use crate::vote_right::VoteRightGate;
use sanctions_types::{
    Actor, PageTitle, ReceiptKind, Sanction, SanctionReceipt, SanctionResult, SanctionState,
    ThreadClass, Verdict,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Client module loaded on the sanctions board
pub const BOARD_MODULE: &str = "ext.sanctions.flow-board";
/// Client module loaded on a sanction topic
pub const TOPIC_MODULE: &str = "ext.sanctions.flow-topic";

/// Host-provided collaborators
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn SanctionStore>,
    pub votes: Arc<dyn VoteSource>,
    pub vote_rights: Arc<dyn VoteRightProvider>,
    pub enactment: Arc<dyn EnactmentTrigger>,
    pub messages: Arc<dyn MessageSource>,
    pub clock: Arc<dyn Clock>,
}

/// A page view as seen by the runtime
#[derive(Clone, Debug)]
pub struct ViewRequest {
    pub title: PageTitle,
    pub viewer: Option<Actor>,
    /// Query parameters of the request
    pub params: HashMap<String, String>,
}

impl ViewRequest {
    pub fn new(title: &str, viewer: Option<Actor>) -> Self {
        Self {
            title: PageTitle::new(title),
            viewer,
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// What the view of a sanction topic should show
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicView {
    pub sanction: Sanction,
    pub state: SanctionState,
    /// Whether the viewer is offered the voting controls
    pub voting_ui: bool,
    /// Set once the sanction has expired
    pub verdict: Option<Verdict>,
}

/// Result of handling a page view
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOutcome {
    pub class: ThreadClass,
    pub modules: Vec<String>,
    /// Page the viewer should be sent to instead
    pub redirect: Option<String>,
    pub topic: Option<TopicView>,
}

impl ViewOutcome {
    fn empty(class: ThreadClass) -> Self {
        Self {
            class,
            modules: Vec::new(),
            redirect: None,
            topic: None,
        }
    }
}

/// Drives sanctions through their lifecycle on page views
#[derive(Clone)]
pub struct SanctionOrchestrator {
    resolver: TopicResolver,
    gate: VoteRightGate,
    evaluator: ExpirationEvaluator,
    tally: VoteTallyEngine,
    policy: Arc<dyn PassPolicy>,
    enactment: Arc<dyn EnactmentTrigger>,
    store: Arc<dyn SanctionStore>,
    messages: Arc<dyn MessageSource>,
    agent: Arc<dyn SystemAgentMatcher>,
    clock: Arc<dyn Clock>,
    notifications: NotificationConfig,
    special_page: String,
}

impl SanctionOrchestrator {
    /// Wire up the runtime with the default policy and agent matcher
    pub fn from_config(config: &SanctionsConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            store,
            votes,
            vote_rights,
            enactment,
            messages,
            clock,
        } = collaborators;

        let gate = VoteRightGate::new(vote_rights);
        let evaluator = ExpirationEvaluator::new(clock.clone());
        let agent: Arc<dyn SystemAgentMatcher> =
            Arc::new(LocalizedNameMatcher::new(messages.clone()));
        let tally = VoteTallyEngine::new(
            store.clone(),
            votes,
            messages.clone(),
            gate.clone(),
            agent.clone(),
            evaluator.clone(),
        );

        Self {
            resolver: TopicResolver::new(
                store.clone(),
                messages.clone(),
                config.voting.topic_namespace.clone(),
            ),
            gate,
            evaluator,
            tally,
            policy: Arc::new(MajorityPolicy::from_config(&config.voting, messages.clone())),
            enactment,
            store,
            messages,
            agent,
            clock,
            notifications: config.notifications,
            special_page: config.voting.special_page.clone(),
        }
    }

    /// Replace the pass policy
    pub fn with_policy(mut self, policy: Arc<dyn PassPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn resolver(&self) -> &TopicResolver {
        &self.resolver
    }

    pub fn tally_engine(&self) -> &VoteTallyEngine {
        &self.tally
    }

    /// The email and event boundary sharing this runtime's agent matcher
    pub fn notification_boundary(
        &self,
        watchlist: Arc<dyn WatchlistStore>,
    ) -> NotificationBoundary {
        NotificationBoundary::new(
            BotActionFilter::new(self.agent.clone(), self.notifications),
            watchlist,
            self.clock.clone(),
        )
    }

    pub fn affordances(&self) -> Affordances {
        Affordances::new(
            self.gate.clone(),
            self.messages.clone(),
            self.special_page.clone(),
        )
    }

    pub fn client_config(&self) -> ClientConfigVars {
        ClientConfigVars::resolve(self.messages.as_ref())
    }

    /// Handle a page view
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn on_page_view(&self, request: &ViewRequest) -> SanctionResult<ViewOutcome> {
        let class = self.resolver.classify(&request.title);
        match class {
            ThreadClass::Board => {
                let redirect = match request.params.get("redirect").map(String::as_str) {
                    Some("no") => None,
                    _ => Some(self.special_page.clone()),
                };
                Ok(ViewOutcome {
                    modules: vec![BOARD_MODULE.to_string()],
                    redirect,
                    ..ViewOutcome::empty(class)
                })
            }
            ThreadClass::Topic(topic) => match self.resolver.resolve(&topic).await? {
                Some(sanction) => {
                    let view = self.view_topic(sanction, request.viewer.as_ref()).await?;
                    Ok(ViewOutcome {
                        modules: vec![TOPIC_MODULE.to_string()],
                        topic: Some(view),
                        ..ViewOutcome::empty(class)
                    })
                }
                None => Ok(ViewOutcome::empty(class)),
            },
            ThreadClass::Other => Ok(ViewOutcome::empty(class)),
        }
    }

    async fn view_topic(
        &self,
        sanction: Sanction,
        viewer: Option<&Actor>,
    ) -> SanctionResult<TopicView> {
        let (sanction, verdict) = if self.evaluator.is_expired(&sanction) {
            let (sanction, verdict) = self.settle(sanction).await?;
            (sanction, Some(verdict))
        } else {
            match self.tally.refresh(&sanction).await {
                Ok(updated) => (updated, None),
                Err(e) if e.is_misuse() => {
                    // Deadline passed between the check and the refresh
                    let (sanction, verdict) = self.settle(sanction).await?;
                    (sanction, Some(verdict))
                }
                Err(e) => {
                    warn!(topic = %sanction.topic, error = %e, "Tally refresh failed");
                    (sanction, None)
                }
            }
        };

        let state = sanction.state();
        let voting_ui = state == SanctionState::Open && self.gate.can_vote(viewer);

        Ok(TopicView {
            sanction,
            state,
            voting_ui,
            verdict,
        })
    }

    /// Freeze an expired sanction, judge it and enact it when passed
    async fn settle(&self, mut sanction: Sanction) -> SanctionResult<(Sanction, Verdict)> {
        let now = self.clock.now();

        if !sanction.expired {
            sanction = self.store.mark_expired(&sanction.topic).await?;
            self.store
                .append_receipt(SanctionReceipt::new(
                    sanction.topic,
                    ReceiptKind::Expired,
                    format!("Voting closed on sanction against {}", sanction.subject),
                    now,
                ))
                .await?;
            info!(
                topic = %sanction.topic,
                agree = sanction.tally.agree,
                disagree = sanction.tally.disagree,
                "Sanction expired"
            );
        }

        let verdict = self.policy.verdict(&sanction);
        debug!(topic = %sanction.topic, passed = verdict.passed, "Verdict computed");

        if verdict.passed && !sanction.enacted {
            match self.enactment.enact(&sanction, &verdict).await {
                Ok(()) => {
                    sanction = self.store.mark_enacted(&sanction.topic).await?;
                    let mut receipt = SanctionReceipt::new(
                        sanction.topic,
                        ReceiptKind::Enacted,
                        format!("Sanction against {} enacted", sanction.subject),
                        now,
                    );
                    if let Some(days) = verdict.block_days {
                        receipt = receipt.with_metadata("block_days", days.to_string());
                    }
                    self.store.append_receipt(receipt).await?;
                    info!(topic = %sanction.topic, "Sanction enacted");
                }
                Err(e) => {
                    error!(
                        topic = %sanction.topic,
                        error = %e,
                        "Enactment failed, will retry on a later view"
                    );
                }
            }
        }

        Ok((sanction, verdict))
    }
}
