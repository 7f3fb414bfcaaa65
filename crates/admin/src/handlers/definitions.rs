#![forbid(unsafe_code)]

use crate::*;
use serde_json::{Value, json};
use ts_core::model::CollectionKind;

struct VerbDefinition {
    verb: &'static str,
    description: &'static str,
    mutating: bool,
    required: &'static [&'static str],
    optional: &'static [&'static str],
}

const CONTENT_FIELDS: [&str; 6] = [
    "title_en",
    "title_ar",
    "body_en",
    "body_ar",
    "link_url",
    "media_url",
];

const COLLECTION_VERBS: [VerbDefinition; 8] = [
    VerbDefinition {
        verb: "list",
        description: "List the scope in order, with its revision.",
        mutating: false,
        required: &[],
        optional: &[],
    },
    VerbDefinition {
        verb: "get",
        description: "Fetch one record by id.",
        mutating: false,
        required: &["id"],
        optional: &[],
    },
    VerbDefinition {
        verb: "first",
        description: "Fetch the record at order 0 of the scope, or null.",
        mutating: false,
        required: &[],
        optional: &[],
    },
    VerbDefinition {
        verb: "create",
        description: "Append a record at the end of the scope.",
        mutating: true,
        required: &["title_en"],
        optional: &[
            "title_ar",
            "body_en",
            "body_ar",
            "link_url",
            "media_url",
            "expected_revision",
        ],
    },
    VerbDefinition {
        verb: "update",
        description: "Edit content and optionally move the record to order `to`.",
        mutating: true,
        required: &["id"],
        optional: &[
            "title_en",
            "title_ar",
            "body_en",
            "body_ar",
            "link_url",
            "media_url",
            "from",
            "to",
            "expected_revision",
        ],
    },
    VerbDefinition {
        verb: "move",
        description: "Move a record to order `to`, shifting the siblings in between.",
        mutating: true,
        required: &["id", "to"],
        optional: &["from", "expected_revision"],
    },
    VerbDefinition {
        verb: "delete",
        description: "Remove a record and close the gap it leaves.",
        mutating: true,
        required: &["id"],
        optional: &["expected_revision"],
    },
    VerbDefinition {
        verb: "normalize",
        description: "Renumber the scope to 0..n-1, repairing gaps left by manual edits.",
        mutating: true,
        required: &[],
        optional: &["expected_revision"],
    },
];

fn collection_definition(kind: CollectionKind, def: &VerbDefinition) -> Value {
    let mut required: Vec<&str> = def.required.to_vec();
    // Ids are unique per collection, so get needs no scope.
    if kind.is_scoped() && def.verb != "get" {
        required.insert(0, "parent_id");
    }
    json!({
        "name": format!("{}.{}", kind.as_str(), def.verb),
        "description": def.description,
        "mutating": def.mutating,
        "requires_token": true,
        "required": required,
        "optional": def.optional,
        "scope": kind.parent().map(|parent| parent.as_str()),
    })
}

pub(crate) fn handler_definitions() -> Vec<Value> {
    let mut handlers = vec![
        json!({
            "name": "auth.login",
            "description": "Exchange admin credentials for a signed token.",
            "mutating": false,
            "requires_token": false,
            "required": ["username", "password"],
            "optional": [],
        }),
        json!({
            "name": "auth.verify",
            "description": "Check a token and return its claims.",
            "mutating": false,
            "requires_token": false,
            "required": [],
            "optional": ["token"],
        }),
        json!({
            "name": "help",
            "description": "Describe every supported action.",
            "mutating": false,
            "requires_token": false,
            "required": [],
            "optional": [],
        }),
        json!({
            "name": "events.since",
            "description": "Read audit events after a sequence number.",
            "mutating": false,
            "requires_token": true,
            "required": [],
            "optional": ["since_seq", "limit", "collection"],
        }),
    ];
    for kind in CollectionKind::ALL {
        for def in &COLLECTION_VERBS {
            handlers.push(collection_definition(kind, def));
        }
    }
    handlers.sort_by_key(|action| {
        action
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    });
    handlers
}

impl AdminServer {
    pub(crate) fn action_help(&mut self) -> Value {
        admin_ok(
            "help",
            json!({
                "actions": handler_definitions(),
                "content_fields": CONTENT_FIELDS,
            }),
        )
    }
}
