#![forbid(unsafe_code)]

use super::super::{EventRow, StoreError};
use rusqlite::{Transaction, params};
use ts_core::model::CollectionKind;

pub(in crate::store) struct EventInsertTxArgs<'a> {
    pub(in crate::store) now_ms: i64,
    pub(in crate::store) kind: CollectionKind,
    pub(in crate::store) item_id: Option<&'a str>,
    pub(in crate::store) event_type: &'a str,
    pub(in crate::store) payload: serde_json::Value,
}

pub(in crate::store) fn insert_event_tx(
    tx: &Transaction<'_>,
    args: EventInsertTxArgs<'_>,
) -> Result<EventRow, StoreError> {
    let EventInsertTxArgs {
        now_ms,
        kind,
        item_id,
        event_type,
        payload,
    } = args;
    let payload_json = payload.to_string();
    tx.execute(
        r#"
        INSERT INTO events(ts_ms, collection, item_id, type, payload_json)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![now_ms, kind.as_str(), item_id, event_type, payload_json],
    )?;
    Ok(EventRow {
        seq: tx.last_insert_rowid(),
        ts_ms: now_ms,
        kind: kind.as_str().to_string(),
        item_id: item_id.map(str::to_string),
        event_type: event_type.to_string(),
        payload_json,
    })
}
