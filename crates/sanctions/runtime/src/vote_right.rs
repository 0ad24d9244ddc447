//! Vote-right gate
//!
//! Decides whether an actor may cast (and be shown) sanction votes. The
//! check runs on every call with the actor of the current request; there is
//! no ambient "current user".

use crate::traits::VoteRightProvider;
use sanctions_types::Actor;
use std::sync::Arc;
use tracing::trace;

/// Gate in front of the platform's vote-right capability
#[derive(Clone)]
pub struct VoteRightGate {
    provider: Arc<dyn VoteRightProvider>,
}

impl VoteRightGate {
    pub fn new(provider: Arc<dyn VoteRightProvider>) -> Self {
        Self { provider }
    }

    /// Whether `actor` may vote. Always false without an actor or for a
    /// logged-out one.
    pub fn can_vote(&self, actor: Option<&Actor>) -> bool {
        let Some(actor) = actor else {
            return false;
        };
        if !actor.is_registered() {
            return false;
        }
        let allowed = self.provider.has_vote_right(actor);
        trace!(actor = %actor, allowed, "Vote right evaluated");
        allowed
    }
}
