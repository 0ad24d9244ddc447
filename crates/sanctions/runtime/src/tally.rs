//! Vote Tally Engine: recomputes a sanction's counts from its thread
//!
//! Every refresh re-reads the whole thread and rebuilds the tally from
//! scratch, then overwrites the stored one. Concurrent refreshes therefore
//! converge on the same result whatever their interleaving, and a refresh
//! that raced a new vote is simply corrected by the next one.
//!
//! Votes are replies carrying the agree or disagree template, e.g.
//! `{{Sanctions-agree|7}}` or `{{Sanctions-disagree}}`. Each voter's latest
//! vote counts. Replies by the subject, by the system agent, by actors
//! without the vote right, and replies posted after the deadline are
//! ignored.

use crate::bot_filter::SystemAgentMatcher;
use crate::expiration::ExpirationEvaluator;
use crate::messages::{self, keys, MessageSource};
use crate::traits::{SanctionStore, VoteSource};
use crate::vote_right::VoteRightGate;
use sanctions_types::{
    ReceiptKind, Sanction, SanctionError, SanctionReceipt, SanctionResult, Stance, ThreadReply,
    Vote, VoteTally,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Template titles marking votes in replies
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteMarkers {
    agree: String,
    disagree: String,
}

impl VoteMarkers {
    pub fn new(agree: &str, disagree: &str) -> Self {
        Self {
            agree: normalize_template(agree),
            disagree: normalize_template(disagree),
        }
    }

    /// Resolve the marker titles from the content language
    pub fn resolve(source: &dyn MessageSource) -> SanctionResult<Self> {
        let agree = messages::require(source, keys::AGREE_TEMPLATE_TITLE)?;
        let disagree = messages::require(source, keys::DISAGREE_TEMPLATE_TITLE)?;
        Ok(Self::new(&agree, &disagree))
    }

    /// The stance expressed by a reply; the last marker in the text wins
    pub fn stance(&self, content: &str) -> Option<Stance> {
        let mut stance = None;
        let mut rest = content;

        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                break;
            };
            let inner = &after[..end];
            rest = &after[end + 2..];

            let mut parts = inner.split('|');
            let name = normalize_template(parts.next().unwrap_or_default());
            if name == self.agree {
                let days = parts.next().and_then(|arg| arg.trim().parse::<u32>().ok());
                stance = Some(Stance::Agree { days });
            } else if name == self.disagree {
                stance = Some(Stance::Disagree);
            }
        }

        stance
    }
}

/// Normalize a template reference: drop a `Template:` prefix, treat
/// underscores as spaces, upper-case the first letter.
fn normalize_template(name: &str) -> String {
    let name = name.trim().replace('_', " ");
    let name = match name.split_once(':') {
        Some((ns, rest)) if ns.trim().eq_ignore_ascii_case("template") => rest.trim().to_string(),
        _ => name,
    };
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Recomputes and stores tallies for open sanctions
#[derive(Clone)]
pub struct VoteTallyEngine {
    store: Arc<dyn SanctionStore>,
    votes: Arc<dyn VoteSource>,
    messages: Arc<dyn MessageSource>,
    gate: VoteRightGate,
    agent: Arc<dyn SystemAgentMatcher>,
    evaluator: ExpirationEvaluator,
}

impl VoteTallyEngine {
    pub fn new(
        store: Arc<dyn SanctionStore>,
        votes: Arc<dyn VoteSource>,
        messages: Arc<dyn MessageSource>,
        gate: VoteRightGate,
        agent: Arc<dyn SystemAgentMatcher>,
        evaluator: ExpirationEvaluator,
    ) -> Self {
        Self {
            store,
            votes,
            messages,
            gate,
            agent,
            evaluator,
        }
    }

    /// Recompute the tally of an open sanction and store it.
    ///
    /// Refreshing an expired sanction is a caller bug and is refused with
    /// [`SanctionError::RefreshAfterExpiry`]; the stored tally is untouched.
    pub async fn refresh(&self, sanction: &Sanction) -> SanctionResult<Sanction> {
        if self.evaluator.is_expired(sanction) {
            error!(topic = %sanction.topic, "Refresh requested for expired sanction");
            return Err(SanctionError::RefreshAfterExpiry(sanction.topic));
        }

        let markers = VoteMarkers::resolve(self.messages.as_ref())?;
        let replies = self.votes.replies(&sanction.topic).await?;
        let now = self.evaluator.now();

        let effective = self.effective_votes(sanction, &markers, replies);
        let tally = VoteTally::from_votes(effective.values(), now);

        debug!(
            topic = %sanction.topic,
            agree = tally.agree,
            disagree = tally.disagree,
            "Tally recomputed"
        );

        let changed = !tally.same_counts(&sanction.tally);
        let updated = self.store.store_tally(&sanction.topic, tally).await?;

        if changed {
            info!(
                topic = %updated.topic,
                agree = updated.tally.agree,
                disagree = updated.tally.disagree,
                "Sanction tally changed"
            );
            self.store
                .append_receipt(
                    SanctionReceipt::new(
                        updated.topic,
                        ReceiptKind::Refreshed,
                        format!("Tally refreshed for sanction on {}", updated.subject),
                        now,
                    )
                    .with_metadata("agree", updated.tally.agree.to_string())
                    .with_metadata("disagree", updated.tally.disagree.to_string()),
                )
                .await?;
        }

        Ok(updated)
    }

    /// The latest counted vote of every eligible voter
    fn effective_votes(
        &self,
        sanction: &Sanction,
        markers: &VoteMarkers,
        mut replies: Vec<ThreadReply>,
    ) -> HashMap<String, Vote> {
        replies.sort_by_key(|r| r.posted_at);

        let mut effective = HashMap::new();
        for reply in replies {
            if reply.posted_at >= sanction.deadline
                || reply.author.has_name(&sanction.subject)
                || self.agent.is_system_agent(Some(&reply.author))
                || !self.gate.can_vote(Some(&reply.author))
            {
                continue;
            }
            if let Some(stance) = markers.stance(&reply.content) {
                let vote = Vote::new(reply.author, stance, reply.posted_at);
                effective.insert(vote.voter.name.clone(), vote);
            }
        }
        effective
    }
}
