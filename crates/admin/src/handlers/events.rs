#![forbid(unsafe_code)]

use super::render::event_json;
use crate::*;
use serde_json::{Value, json};
use ts_core::model::CollectionKind;
use ts_storage::EventsSinceRequest;

const DEFAULT_EVENTS_LIMIT: usize = 50;
const MAX_EVENTS_LIMIT: usize = 500;

impl AdminServer {
    pub(crate) fn action_events_since(&mut self, args: Value) -> Value {
        let args = match args_object(args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let since_seq = match optional_i64(&args, "since_seq") {
            Ok(v) => v.unwrap_or(0),
            Err(resp) => return resp,
        };
        let limit = match optional_usize(&args, "limit") {
            Ok(v) => v.unwrap_or(DEFAULT_EVENTS_LIMIT).clamp(1, MAX_EVENTS_LIMIT),
            Err(resp) => return resp,
        };
        let kind = match optional_string(&args, "collection") {
            Ok(None) => None,
            Ok(Some(raw)) => match CollectionKind::parse(&raw) {
                Some(kind) => Some(kind),
                None => return invalid_input(&format!("unknown collection: {raw}")),
            },
            Err(resp) => return resp,
        };

        match self.store.events_since(EventsSinceRequest {
            since_seq,
            limit,
            kind,
        }) {
            Ok(events) => {
                let next_seq = events.last().map(|e| e.seq).unwrap_or(since_seq);
                admin_ok(
                    "events.since",
                    json!({
                        "events": events.iter().map(event_json).collect::<Vec<_>>(),
                        "next_seq": next_seq,
                    }),
                )
            }
            Err(err) => store_error(&err),
        }
    }
}
