//! Expiration evaluator
//!
//! A sanction is expired once it is flagged as such or once the clock has
//! reached its deadline. The evaluator only answers the question; marking
//! the record is left to the orchestrator.

use crate::traits::Clock;
use chrono::{DateTime, Duration, Utc};
use sanctions_types::Sanction;
use std::sync::Arc;

/// Whether `sanction`'s voting window is closed at `now`
pub fn is_expired_at(sanction: &Sanction, now: DateTime<Utc>) -> bool {
    sanction.expired || now >= sanction.deadline
}

/// Evaluates voting windows against a clock
#[derive(Clone)]
pub struct ExpirationEvaluator {
    clock: Arc<dyn Clock>,
}

impl ExpirationEvaluator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn is_expired(&self, sanction: &Sanction) -> bool {
        is_expired_at(sanction, self.clock.now())
    }

    /// Time left before the deadline; `None` once expired
    pub fn remaining(&self, sanction: &Sanction) -> Option<Duration> {
        let now = self.clock.now();
        if is_expired_at(sanction, now) {
            None
        } else {
            Some(sanction.deadline - now)
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
