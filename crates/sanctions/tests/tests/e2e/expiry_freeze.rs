//! End-to-end test: a sanction past its deadline.
//!
//! Once the deadline has passed the tally is frozen: a direct refresh is
//! refused, a view no longer reads the thread, and late votes never count.

use chrono::Duration;
use sanctions_runtime::{ExpirationEvaluator, SanctionStore};
use sanctions_tests::Harness;
use sanctions_types::{ReceiptKind, SanctionError, SanctionState};

#[tokio::test]
async fn past_deadline_refresh_rejected_and_tally_unchanged() {
    let h = Harness::new();
    let sanction = h
        .open_block("abc123", "Troll", 3, Duration::days(7))
        .await
        .unwrap();
    let alice = h.voter(1, "Alice");
    h.reply(sanction.topic, alice, "{{Sanctions-agree}}").await;
    let before = h.view_topic(sanction.topic, None).await.unwrap().unwrap();
    assert_eq!(before.sanction.tally.agree, 1);

    h.clock.advance(Duration::days(7));
    let evaluator = ExpirationEvaluator::new(h.clock.clone());
    assert!(evaluator.is_expired(&before.sanction));

    let err = h
        .orchestrator
        .tally_engine()
        .refresh(&before.sanction)
        .await
        .unwrap_err();
    assert!(matches!(err, SanctionError::RefreshAfterExpiry(t) if t == sanction.topic));

    let stored = h.stored(sanction.topic).await.unwrap().unwrap();
    assert_eq!(stored.tally, before.sanction.tally);
}

#[tokio::test]
async fn view_after_deadline_freezes_without_reading_thread() {
    let h = Harness::new();
    let sanction = h
        .open_block("abc123", "Troll", 3, Duration::days(7))
        .await
        .unwrap();
    let alice = h.voter(1, "Alice");
    h.reply(sanction.topic, alice.clone(), "{{Sanctions-agree}}").await;
    h.view_topic(sanction.topic, None).await.unwrap();
    let reads = h.votes.reads();

    h.clock.advance(Duration::days(8));
    let bob = h.voter(2, "Bob");
    h.reply(sanction.topic, bob, "{{Sanctions-agree}}").await;

    let view = h
        .view_topic(sanction.topic, Some(alice))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(view.state, SanctionState::Expired);
    assert!(!view.voting_ui);
    assert_eq!(view.sanction.tally.agree, 1);
    assert!(!view.verdict.unwrap().passed);
    assert_eq!(h.votes.reads(), reads);

    let stored = h.stored(sanction.topic).await.unwrap().unwrap();
    assert!(stored.expired);
}

#[tokio::test]
async fn expiry_recorded_once() {
    let h = Harness::new();
    let sanction = h
        .open_block("abc123", "Troll", 3, Duration::days(1))
        .await
        .unwrap();
    h.clock.advance(Duration::days(2));

    for _ in 0..3 {
        h.view_topic(sanction.topic, None).await.unwrap();
    }

    let expired = h
        .store
        .receipts_for(&sanction.topic)
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.kind == ReceiptKind::Expired)
        .count();
    assert_eq!(expired, 1);
}

#[tokio::test]
async fn evaluator_shares_harness_clock() {
    let h = Harness::new();
    let sanction = h
        .open_block("abc123", "Troll", 3, Duration::hours(1))
        .await
        .unwrap();
    let evaluator = ExpirationEvaluator::new(h.clock.clone());

    assert_eq!(evaluator.remaining(&sanction), Some(Duration::hours(1)));
    h.clock.advance(Duration::minutes(59));
    assert!(!evaluator.is_expired(&sanction));
    h.clock.advance(Duration::minutes(1));
    assert!(evaluator.is_expired(&sanction));
}
