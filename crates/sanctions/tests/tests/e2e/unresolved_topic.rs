//! End-to-end test: topics that carry no sanction.
//!
//! A well-formed identifier without a sanction record, a malformed one and
//! an unrelated page must all be handled quietly: no modules, no topic view,
//! no error and no thread read.

use sanctions_tests::Harness;
use sanctions_types::{ThreadClass, TopicId};

#[tokio::test]
async fn well_formed_identifier_without_sanction_is_quiet() {
    let h = Harness::new();
    let viewer = h.voter(1, "Alice");

    let outcome = h.view("Topic:abc123", Some(viewer)).await.unwrap();

    assert_eq!(
        outcome.class,
        ThreadClass::Topic(TopicId::parse("abc123").unwrap())
    );
    assert!(outcome.modules.is_empty());
    assert!(outcome.topic.is_none());
    assert_eq!(outcome.redirect, None);
    assert_eq!(h.votes.reads(), 0);
}

#[tokio::test]
async fn identifier_resolves_regardless_of_case() {
    let h = Harness::new();
    let sanction = h
        .open_block("abc123", "Troll", 3, chrono::Duration::days(7))
        .await
        .unwrap();

    let upper = h.view("Topic:ABC123", None).await.unwrap();
    assert_eq!(upper.topic.unwrap().sanction.topic, sanction.topic);

    let hex = format!("Topic:{}", sanction.topic.hex().to_uppercase());
    let by_hex = h.view(&hex, None).await.unwrap();
    assert_eq!(by_hex.topic.unwrap().sanction.topic, sanction.topic);
}

#[tokio::test]
async fn malformed_identifier_is_not_a_topic() {
    let h = Harness::new();

    for title in ["Topic:abc-123", "Topic:", "Topic:zzzzzzzzzzzzzzzzzzzz"] {
        let outcome = h.view(title, None).await.unwrap();
        assert_eq!(outcome.class, ThreadClass::Other, "{title}");
        assert!(outcome.topic.is_none());
    }
}

#[tokio::test]
async fn pages_outside_topic_namespace_ignored() {
    let h = Harness::new();
    h.open_block("abc123", "Troll", 3, chrono::Duration::days(7))
        .await
        .unwrap();

    let outcome = h.view("Talk:Abc123", None).await.unwrap();
    assert_eq!(outcome.class, ThreadClass::Other);
    assert_eq!(h.votes.reads(), 0);
}
