//! Property tests: the agent is recognized by its configured name only.

use proptest::prelude::*;
use sanctions_runtime::{
    keys, BotActionFilter, LocalizedNameMatcher, NotificationConfig, StaticMessages,
};
use sanctions_types::{Actor, NotificationDecision};
use std::collections::HashMap;
use std::sync::Arc;

fn filter(bot_name: &str) -> BotActionFilter {
    let mut table = HashMap::new();
    table.insert(keys::BOT_NAME.to_string(), bot_name.to_string());
    let messages = Arc::new(StaticMessages::new(table));
    BotActionFilter::new(
        Arc::new(LocalizedNameMatcher::new(messages)),
        NotificationConfig::default(),
    )
}

proptest! {
    /// An actor is the agent exactly when its name equals the configured one.
    #[test]
    fn agent_iff_name_matches(
        bot in "[A-Z][a-z]{2,8}( [A-Z][a-z]{2,8})?",
        name in "[A-Z][a-z]{2,8}( [A-Z][a-z]{2,8})?",
        id in 1u64..10_000,
    ) {
        let filter = filter(&bot);
        let actor = Actor::user(id, name.clone());

        prop_assert_eq!(filter.is_system_agent(Some(&actor)), name == bot);
        prop_assert!(filter.is_system_agent(Some(&Actor::user(id, bot.clone()))));
        prop_assert!(!filter.is_system_agent(None));
    }

    /// Only agent events are dropped.
    #[test]
    fn only_agent_events_suppressed(name in "[A-Za-z ]{1,16}") {
        let filter = filter("Sanction Bot");
        let decision = filter.event_decision(Some(&Actor::user(1, name.clone())));
        let expected = if name == "Sanction Bot" {
            NotificationDecision::Suppress
        } else {
            NotificationDecision::Continue
        };
        prop_assert_eq!(decision, expected);
    }
}
