#![forbid(unsafe_code)]

use serde_json::{Value, json};
use ts_core::model::CollectionKind;
use ts_storage::{EventRow, OrderedItemRow, ScopeRef};

pub(super) fn item_json(item: &OrderedItemRow) -> Value {
    json!({
        "id": item.id,
        "collection": item.kind.as_str(),
        "parent_id": item.parent_id,
        "order": item.order,
        "title_en": item.content.title_en,
        "title_ar": item.content.title_ar,
        "body_en": item.content.body_en,
        "body_ar": item.content.body_ar,
        "link_url": item.content.link_url,
        "media_url": item.content.media_url,
        "created_at_ms": item.created_at_ms,
        "updated_at_ms": item.updated_at_ms,
    })
}

pub(super) fn items_json(items: &[OrderedItemRow]) -> Value {
    Value::Array(items.iter().map(item_json).collect())
}

pub(super) fn scope_json(scope: &ScopeRef) -> Value {
    json!({
        "collection": scope.kind.as_str(),
        "parent_id": scope.parent_id,
    })
}

/// `{"tab_buttons": 3}`: children removed with a parent, per child collection.
pub(super) fn cascaded_json(cascaded: &[(CollectionKind, usize)]) -> Value {
    Value::Object(
        cascaded
            .iter()
            .map(|(kind, count)| (kind.as_str().to_string(), json!(count)))
            .collect(),
    )
}

pub(super) fn event_json(event: &EventRow) -> Value {
    let payload = serde_json::from_str::<Value>(&event.payload_json).unwrap_or(Value::Null);
    json!({
        "event_id": event.event_id(),
        "seq": event.seq,
        "ts_ms": event.ts_ms,
        "collection": event.kind,
        "item_id": event.item_id,
        "type": event.event_type,
        "payload": payload,
    })
}
