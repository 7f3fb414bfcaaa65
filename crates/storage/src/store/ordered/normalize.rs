#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::{NormalizeRequest, NormalizeResult, SqliteStore, StoreError, now_ms};
use serde_json::json;

impl SqliteStore {
    /// Renumbers a scope to `0..n` keeping its current relative order. Repairs gaps left by
    /// imports or manual edits; a dense scope is left untouched.
    pub fn ordered_normalize(
        &mut self,
        request: NormalizeRequest,
    ) -> Result<NormalizeResult, StoreError> {
        let NormalizeRequest {
            scope,
            expected_revision,
        } = request;

        let now_ms = now_ms();
        let kind = scope.kind;
        let tx = self.begin_write()?;

        resolve_scope(&tx, &scope)?;
        let scope_revision = bump_scope_revision_tx(&tx, &scope, expected_revision, now_ms)?;
        let items = list_scope(&tx, kind, scope.parent_id.as_deref())?;

        let mut assignments = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let order = i64::try_from(index)
                .map_err(|_| StoreError::InvalidInput("numeric overflow"))?;
            if item.order != order {
                assignments.push((item.id.clone(), order));
            }
        }
        let renumbered = renumber_tx(&tx, kind, scope.parent_id.as_deref(), &assignments)?;

        let event = insert_event_tx(
            &tx,
            EventInsertTxArgs {
                now_ms,
                kind,
                item_id: None,
                event_type: "scope_normalized",
                payload: json!({
                    "collection": kind.as_str(),
                    "parent_id": scope.parent_id,
                    "renumbered": renumbered,
                    "scope_revision": scope_revision,
                }),
            },
        )?;

        tx.commit()?;
        if renumbered > 0 {
            tracing::info!(collection = %kind, renumbered, "normalized scope with gaps");
        }

        Ok(NormalizeResult {
            scope_revision,
            renumbered,
            event,
        })
    }
}
