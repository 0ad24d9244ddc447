//! End-to-end test: the board page, tool links and client variables.

use sanctions_runtime::{keys, ToolboxEntry, ToolLink, BOARD_MODULE};
use sanctions_tests::Harness;
use sanctions_types::{Actor, ThreadClass};

#[tokio::test]
async fn board_view_redirects_to_special_page() {
    let h = Harness::new();

    let outcome = h.view("Project_talk:Sanctions", None).await.unwrap();

    assert_eq!(outcome.class, ThreadClass::Board);
    assert_eq!(outcome.modules, vec![BOARD_MODULE.to_string()]);
    assert_eq!(outcome.redirect.as_deref(), Some("Special:Sanctions"));
    assert_eq!(h.votes.reads(), 0);
}

#[tokio::test]
async fn board_follows_renamed_discussion_page() {
    let h = Harness::new();
    h.messages.set(keys::DISCUSSION_PAGE_NAME, "Project:Sanction board");

    let old = h.view("Project talk:Sanctions", None).await.unwrap();
    assert_eq!(old.class, ThreadClass::Other);

    let new = h.view("Project:Sanction board", None).await.unwrap();
    assert_eq!(new.class, ThreadClass::Board);
}

#[test]
fn tool_links_offered_to_voters_only() {
    let h = Harness::new();
    let alice = h.voter(1, "Alice");
    let mallory = Actor::user(7, "Mallory");
    let tools = h.orchestrator.affordances();

    assert_eq!(
        tools.diff_tool(Some(&alice), "Troll", Some(10), 11).unwrap().target,
        "Special:Sanctions/Troll/10/11"
    );
    assert_eq!(
        tools.history_tool(Some(&alice), "Troll", 11).unwrap().target,
        "Special:Sanctions/Troll/11"
    );
    assert!(tools.user_tool(Some(&mallory), "Troll").is_none());
    assert_eq!(
        tools.contributions_tool("Troll").target,
        "Special:Sanctions/Troll"
    );
}

#[test]
fn toolbox_entry_follows_block_link() {
    let h = Harness::new();
    let entry = |key: &str| ToolboxEntry {
        key: key.to_string(),
        id: format!("t-{key}"),
        link: ToolLink {
            target: format!("Special:{key}"),
            label: key.to_string(),
        },
    };
    let mut toolbox = vec![entry("log"), entry("blockip"), entry("upload")];

    h.orchestrator
        .affordances()
        .insert_toolbox(&mut toolbox, Some("Troll"));

    let keys: Vec<_> = toolbox.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["log", "blockip", "sanctions", "upload"]);
}

#[test]
fn client_config_exports_current_messages() {
    let h = Harness::new();
    h.messages.set(keys::MAX_BLOCK_PERIOD, "60");

    let json = h.orchestrator.client_config().to_json().unwrap();
    let vars: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(vars["wgSanctionsAgreeTemplate"], "Sanctions-agree");
    assert_eq!(vars["wgSanctionsDisagreeTemplate"], "Sanctions-disagree");
    assert_eq!(vars["wgSanctionsMaxBlockPeriod"], 60);
}
