//! End-to-end test: notifications caused by the sanction agent.
//!
//! Emails about the agent's edits are suppressed. When the host tracks
//! watch lists, the "changed" marker the email would have set is applied
//! instead. Edits by anyone else go through untouched.

use sanctions_runtime::{keys, NotificationConfig, SanctionsConfig};
use sanctions_tests::Harness;
use sanctions_types::{Actor, PageTitle};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn harness(enotif_watchlist: bool, show_updated_marker: bool) -> Harness {
    let mut config = SanctionsConfig::default();
    config.notifications = NotificationConfig {
        enotif_watchlist,
        show_updated_marker,
    };
    Harness::with_config(config)
}

fn board() -> PageTitle {
    PageTitle::new("Project talk:Sanctions")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn agent_edit_suppressed_and_watchlist_updated() {
    for (enotif, marker) in [(true, false), (false, true), (true, true)] {
        let h = harness(enotif, marker);
        h.watchlist.watch("Alice", &board()).await;

        let send = h.boundary().before_email(Some(&h.bot()), &board()).await.unwrap();

        assert!(!send);
        assert_eq!(
            h.watchlist.notification_timestamp("Alice", &board()).await,
            Some(h.now())
        );
    }
}

#[tokio::test]
async fn agent_edit_suppressed_without_watchlist_tracking() {
    let h = harness(false, false);
    h.watchlist.watch("Alice", &board()).await;

    let send = h.boundary().before_email(Some(&h.bot()), &board()).await.unwrap();

    assert!(!send);
    assert_eq!(h.watchlist.notification_timestamp("Alice", &board()).await, None);
}

#[tokio::test]
async fn human_edit_not_suppressed() {
    let h = harness(true, true);
    h.watchlist.watch("Bob", &board()).await;
    let alice = Actor::user(1, "Alice");

    let send = h.boundary().before_email(Some(&alice), &board()).await.unwrap();

    assert!(send);
    assert_eq!(h.watchlist.notification_timestamp("Bob", &board()).await, None);
    assert!(h.boundary().before_event(Some(&alice)));
}

#[tokio::test]
async fn agent_events_dropped() {
    let h = harness(false, false);
    let boundary = h.boundary();

    assert!(!boundary.before_event(Some(&h.bot())));
    assert!(boundary.before_event(None));
}

#[tokio::test]
async fn renamed_agent_followed_on_next_edit() {
    let h = harness(true, false);
    let boundary = h.boundary();
    let renamed = Actor::user(sanctions_tests::BOT_ID, "Vote Bot");

    assert!(boundary.before_email(Some(&renamed), &board()).await.unwrap());

    h.messages.set(keys::BOT_NAME, "Vote Bot");
    assert!(!boundary.before_email(Some(&renamed), &board()).await.unwrap());
    assert!(boundary.before_email(Some(&h.bot()), &board()).await.unwrap());
}
