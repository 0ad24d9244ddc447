//! End-to-end test: who sees the voting controls, and what a view refreshes.
//!
//! Viewing an open sanction recomputes its tally exactly once, whoever the
//! viewer is. The voting controls are only offered to registered accounts
//! holding the vote right.

use chrono::Duration;
use sanctions_tests::Harness;
use sanctions_types::{Actor, SanctionState};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_voter_gets_no_voting_ui() {
    let h = Harness::new();
    let sanction = h
        .open_block("abc123", "Troll", 3, Duration::days(7))
        .await
        .unwrap();

    let view = h
        .view_topic(sanction.topic, Some(Actor::user(7, "Mallory")))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(view.state, SanctionState::Open);
    assert!(!view.voting_ui);
}

#[tokio::test]
async fn anonymous_viewer_gets_no_voting_ui() {
    let h = Harness::new();
    let sanction = h
        .open_block("abc123", "Troll", 3, Duration::days(7))
        .await
        .unwrap();
    h.rights.grant("192.0.2.1");

    let anonymous = h
        .view_topic(sanction.topic, Some(Actor::anonymous("192.0.2.1")))
        .await
        .unwrap()
        .unwrap();
    assert!(!anonymous.voting_ui);

    let nobody = h.view_topic(sanction.topic, None).await.unwrap().unwrap();
    assert!(!nobody.voting_ui);
}

#[tokio::test]
async fn voter_on_open_sanction_refreshes_once_per_view() {
    let h = Harness::new();
    let sanction = h
        .open_block("abc123", "Troll", 3, Duration::days(7))
        .await
        .unwrap();
    let alice = h.voter(1, "Alice");
    let bob = h.voter(2, "Bob");
    h.reply(sanction.topic, bob.clone(), "{{Sanctions-agree|5}}")
        .await;

    let first = h
        .view_topic(sanction.topic, Some(alice.clone()))
        .await
        .unwrap()
        .unwrap();
    assert!(first.voting_ui);
    assert_eq!(first.sanction.tally.agree, 1);
    assert_eq!(h.votes.reads(), 1);

    h.clock.advance(Duration::minutes(5));
    h.reply(sanction.topic, alice.clone(), "{{Sanctions-disagree}}")
        .await;

    let second = h
        .view_topic(sanction.topic, Some(alice))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.sanction.tally.agree, 1);
    assert_eq!(second.sanction.tally.disagree, 1);
    assert_eq!(h.votes.reads(), 2);

    let stored = h.stored(sanction.topic).await.unwrap().unwrap();
    assert_eq!(stored.tally, second.sanction.tally);
}

#[tokio::test]
async fn subject_and_agent_votes_not_counted() {
    let h = Harness::new();
    let sanction = h
        .open_block("abc123", "Troll", 3, Duration::days(7))
        .await
        .unwrap();
    let troll = h.voter(9, "Troll");
    let bot = h.bot();
    h.rights.grant(bot.name.clone());
    let carol = h.voter(3, "Carol");

    h.reply(sanction.topic, troll, "{{Sanctions-disagree}}").await;
    h.reply(sanction.topic, bot, "{{Sanctions-agree}}").await;
    h.reply(sanction.topic, carol, "Not sure yet.").await;

    let view = h.view_topic(sanction.topic, None).await.unwrap().unwrap();
    assert_eq!(view.sanction.tally.total(), 0);
}

#[tokio::test]
async fn missing_template_messages_keep_record_and_view() {
    let h = Harness::new();
    let sanction = h
        .open_block("abc123", "Troll", 3, Duration::days(7))
        .await
        .unwrap();
    h.messages
        .unset(sanctions_runtime::keys::AGREE_TEMPLATE_TITLE);

    let view = h.view_topic(sanction.topic, None).await.unwrap().unwrap();
    assert_eq!(view.state, SanctionState::Open);
    assert_eq!(view.sanction, sanction);
}
