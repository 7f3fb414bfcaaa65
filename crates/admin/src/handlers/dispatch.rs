#![forbid(unsafe_code)]

use crate::AdminServer;
use serde_json::Value;
use ts_core::model::CollectionKind;

use super::collections;

/// Actions callable without a token.
const PUBLIC_ACTIONS: [&str; 3] = ["auth.login", "auth.verify", "help"];

pub(crate) fn is_public_action(action: &str) -> bool {
    PUBLIC_ACTIONS.contains(&action)
}

pub(crate) fn dispatch_handler(
    server: &mut AdminServer,
    action: &str,
    token: Option<&str>,
    args: Value,
) -> Option<Value> {
    match action {
        "auth.login" => return Some(server.action_auth_login(args)),
        "auth.verify" => return Some(server.action_auth_verify(token, args)),
        "help" => return Some(server.action_help()),
        "events.since" => return Some(server.action_events_since(args)),
        _ => {}
    }

    let (collection, verb) = action.split_once('.')?;
    let kind = CollectionKind::parse(collection)?;
    collections::dispatch_collection_action(server, kind, verb, args)
}

#[cfg(test)]
pub(crate) fn dispatch_action_names() -> Vec<String> {
    let mut names: Vec<String> = PUBLIC_ACTIONS.iter().map(|s| s.to_string()).collect();
    names.push("events.since".to_string());
    for kind in CollectionKind::ALL {
        for verb in collections::dispatch_collection_verbs() {
            names.push(format!("{}.{verb}", kind.as_str()));
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn handler_definitions_and_dispatch_are_in_sync() {
        let mut defined = BTreeSet::<String>::new();
        for action in super::super::definitions::handler_definitions() {
            let Some(name) = action.get("name").and_then(|v| v.as_str()) else {
                continue;
            };
            defined.insert(name.to_string());
        }

        let dispatched = dispatch_action_names()
            .into_iter()
            .collect::<BTreeSet<_>>();

        let missing_in_definitions = dispatched.difference(&defined).cloned().collect::<Vec<_>>();
        let missing_in_dispatch = defined.difference(&dispatched).cloned().collect::<Vec<_>>();

        assert!(
            missing_in_definitions.is_empty() && missing_in_dispatch.is_empty(),
            "action dispatch/definitions mismatch\n  dispatch-only: {missing_in_definitions:?}\n  definitions-only: {missing_in_dispatch:?}"
        );
    }

    #[test]
    fn only_auth_and_help_are_public() {
        assert!(is_public_action("auth.login"));
        assert!(is_public_action("help"));
        assert!(!is_public_action("hero_steps.list"));
        assert!(!is_public_action("events.since"));
    }
}
