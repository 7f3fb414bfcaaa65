#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::{
    AppendRequest, OrderedItemRow, OrderedOpResult, SqliteStore, StoreError, now_ms,
};
use super::validate_content;
use rusqlite::params;
use serde_json::json;
use ts_core::order::append_position;

impl SqliteStore {
    /// Inserts a record in the last slot of its scope.
    pub fn ordered_append(&mut self, request: AppendRequest) -> Result<OrderedOpResult, StoreError> {
        let AppendRequest {
            scope,
            content,
            expected_revision,
        } = request;
        validate_content(&content)?;

        let now_ms = now_ms();
        let kind = scope.kind;
        let tx = self.begin_write()?;

        resolve_scope(&tx, &scope)?;
        let scope_revision = bump_scope_revision_tx(&tx, &scope, expected_revision, now_ms)?;
        let order = append_position(scope_len(&tx, kind, scope.parent_id.as_deref())?);
        let seq = next_counter_tx(&tx, &format!("{}_seq", kind.as_str()))?;
        let id = format!("{}-{seq:08X}", kind.id_prefix());

        tx.execute(
            &format!(
                r#"
                INSERT INTO {}(
                  id, parent_id, ord, title_en, title_ar, body_en, body_ar,
                  link_url, media_url, created_at_ms, updated_at_ms
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
                kind.as_str()
            ),
            params![
                id,
                scope.parent_id,
                order,
                content.title_en,
                content.title_ar,
                content.body_en,
                content.body_ar,
                content.link_url,
                content.media_url,
                now_ms,
                now_ms
            ],
        )?;

        let event = insert_event_tx(
            &tx,
            EventInsertTxArgs {
                now_ms,
                kind,
                item_id: Some(&id),
                event_type: "item_appended",
                payload: json!({
                    "collection": kind.as_str(),
                    "id": id,
                    "parent_id": scope.parent_id,
                    "order": order,
                    "scope_revision": scope_revision,
                }),
            },
        )?;

        tx.commit()?;
        tracing::debug!(collection = %kind, id = %id, order, "appended ordered item");

        Ok(OrderedOpResult {
            scope_revision,
            item: OrderedItemRow {
                kind,
                id,
                parent_id: scope.parent_id,
                order,
                content,
                created_at_ms: now_ms,
                updated_at_ms: now_ms,
            },
            shifted: 0,
            event,
        })
    }
}
