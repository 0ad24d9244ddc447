//! End-to-end test: concurrent views of the same sanction.
//!
//! Every refresh is a full recomputation, so any number of overlapping
//! views converge on the tally a single view would have produced.

use chrono::Duration;
use futures::future::join_all;
use sanctions_runtime::SanctionStore;
use sanctions_tests::Harness;
use sanctions_types::ReceiptKind;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_views_converge() {
    let h = Arc::new(Harness::new());
    let sanction = h
        .open_block("abc123", "Troll", 7, Duration::days(7))
        .await
        .unwrap();

    for (id, name, content) in [
        (1, "Alice", "{{Sanctions-agree|3}}"),
        (2, "Bob", "{{Sanctions-agree|7}}"),
        (3, "Carol", "{{Sanctions-disagree}}"),
        (4, "Dave", "{{Sanctions-agree}}"),
    ] {
        let voter = h.voter(id, name);
        h.reply(sanction.topic, voter, content).await;
    }

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let orchestrator = h.orchestrator.clone();
            let topic = sanction.topic;
            tokio::spawn(async move {
                orchestrator
                    .on_page_view(&sanctions_runtime::ViewRequest::new(
                        &format!("Topic:{topic}"),
                        None,
                    ))
                    .await
            })
        })
        .collect();

    for result in join_all(handles).await {
        let view = result.unwrap().unwrap().topic.unwrap();
        assert_eq!(view.sanction.tally.agree, 3);
        assert_eq!(view.sanction.tally.disagree, 1);
    }

    let stored = h.stored(sanction.topic).await.unwrap().unwrap();
    assert_eq!(stored.tally.agree, 3);
    assert_eq!(stored.tally.disagree, 1);
    assert_eq!(stored.tally.agree_days, vec![3, 7]);
    assert_eq!(h.votes.reads(), 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_views_after_deadline_enact_at_least_once() {
    let h = Arc::new(Harness::new());
    let sanction = h
        .open_block("abc123", "Troll", 7, Duration::days(7))
        .await
        .unwrap();
    for (id, name) in [(1, "Alice"), (2, "Bob"), (3, "Carol")] {
        let voter = h.voter(id, name);
        h.reply(sanction.topic, voter, "{{Sanctions-agree}}").await;
    }
    h.view_topic(sanction.topic, None).await.unwrap();
    h.clock.advance(Duration::days(8));

    let views = (0..8).map(|_| h.view_topic(sanction.topic, None));
    for view in join_all(views).await {
        assert!(view.unwrap().unwrap().verdict.unwrap().passed);
    }

    let stored = h.stored(sanction.topic).await.unwrap().unwrap();
    assert!(stored.enacted);
    assert!(!h.enactment.calls().is_empty());

    let enacted = h
        .store
        .receipts_for(&sanction.topic)
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.kind == ReceiptKind::Enacted)
        .count();
    assert_eq!(enacted, h.enactment.calls().len());
}
