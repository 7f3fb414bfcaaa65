#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::{RemoveRequest, RemoveResult, SqliteStore, StoreError, now_ms};
use rusqlite::params;
use serde_json::json;
use ts_core::order::plan_remove;

impl SqliteStore {
    /// Deletes a record and closes the gap it leaves in its scope. Children of a parent
    /// record go with it.
    pub fn ordered_remove(&mut self, request: RemoveRequest) -> Result<RemoveResult, StoreError> {
        let RemoveRequest {
            scope,
            id,
            expected_revision,
        } = request;

        let now_ms = now_ms();
        let kind = scope.kind;
        let tx = self.begin_write()?;

        resolve_scope(&tx, &scope)?;
        let removed = load_item_in_scope(&tx, kind, scope.parent_id.as_deref(), &id)?;
        let scope_revision = bump_scope_revision_tx(&tx, &scope, expected_revision, now_ms)?;
        let len_before = scope_len(&tx, kind, scope.parent_id.as_deref())?;

        let cascaded = kind
            .children()
            .map(|child| Ok((child, scope_len(&tx, child, Some(removed.id.as_str()))?)))
            .collect::<Result<Vec<_>, StoreError>>()?;

        tx.execute(
            &format!("DELETE FROM {} WHERE id=?1", kind.as_str()),
            params![removed.id],
        )?;
        drop_child_scopes_tx(&tx, kind, &removed.id)?;

        let shifted = match plan_remove(removed.order, len_before) {
            Some(shift) => shift_range_tx(&tx, kind, scope.parent_id.as_deref(), shift)?,
            None => 0,
        };

        let event = insert_event_tx(
            &tx,
            EventInsertTxArgs {
                now_ms,
                kind,
                item_id: Some(&removed.id),
                event_type: "item_removed",
                payload: json!({
                    "collection": kind.as_str(),
                    "id": removed.id,
                    "parent_id": removed.parent_id,
                    "order": removed.order,
                    "shifted": shifted,
                    "cascaded": cascaded
                        .iter()
                        .map(|(child, count)| (child.as_str().to_string(), json!(count)))
                        .collect::<serde_json::Map<_, _>>(),
                    "scope_revision": scope_revision,
                }),
            },
        )?;

        tx.commit()?;
        tracing::debug!(
            collection = %kind,
            id = %removed.id,
            order = removed.order,
            shifted,
            "removed ordered item"
        );

        Ok(RemoveResult {
            scope_revision,
            removed,
            shifted,
            cascaded,
            event,
        })
    }
}
