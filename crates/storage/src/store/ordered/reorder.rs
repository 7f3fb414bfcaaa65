#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::{
    ContentPatch, MoveRequest, OrderedItemRow, OrderedOpResult, ScopeRef, SqliteStore, StoreError,
    UpdateRequest, now_ms,
};
use super::validate_content;
use rusqlite::Transaction;
use serde_json::json;
use ts_core::order::{check_target, plan_move};

struct RepositionArgs {
    scope: ScopeRef,
    id: String,
    patch: ContentPatch,
    from: Option<i64>,
    to: Option<i64>,
    expected_revision: Option<i64>,
    event_type: &'static str,
}

impl SqliteStore {
    /// Moves one record to slot `to`, shifting the siblings in between by one.
    pub fn ordered_move(&mut self, request: MoveRequest) -> Result<OrderedOpResult, StoreError> {
        let MoveRequest {
            scope,
            id,
            from,
            to,
            expected_revision,
        } = request;
        self.reposition(RepositionArgs {
            scope,
            id,
            patch: ContentPatch::default(),
            from,
            to: Some(to),
            expected_revision,
            event_type: "item_moved",
        })
    }

    /// Edits content and, when `to` differs from the stored order, moves the record too.
    pub fn ordered_update(&mut self, request: UpdateRequest) -> Result<OrderedOpResult, StoreError> {
        let UpdateRequest {
            scope,
            id,
            patch,
            from,
            to,
            expected_revision,
        } = request;
        self.reposition(RepositionArgs {
            scope,
            id,
            patch,
            from,
            to,
            expected_revision,
            event_type: "item_updated",
        })
    }

    fn reposition(&mut self, args: RepositionArgs) -> Result<OrderedOpResult, StoreError> {
        let RepositionArgs {
            scope,
            id,
            patch,
            from,
            to,
            expected_revision,
            event_type,
        } = args;

        let now_ms = now_ms();
        let kind = scope.kind;
        let tx = self.begin_write()?;

        resolve_scope(&tx, &scope)?;
        let mut item = load_item_in_scope(&tx, kind, scope.parent_id.as_deref(), &id)?;
        let scope_revision = bump_scope_revision_tx(&tx, &scope, expected_revision, now_ms)?;
        let previous_order = item.order;
        check_from(&item, from)?;

        patch.apply_to(&mut item.content);
        validate_content(&item.content)?;

        let shifted = match to {
            Some(to) => move_within_scope_tx(&tx, &mut item, to)?,
            None => 0,
        };
        item.updated_at_ms = now_ms;
        write_item_tx(&tx, &item)?;

        let event = insert_event_tx(
            &tx,
            EventInsertTxArgs {
                now_ms,
                kind,
                item_id: Some(&item.id),
                event_type,
                payload: json!({
                    "collection": kind.as_str(),
                    "id": item.id,
                    "parent_id": item.parent_id,
                    "from": previous_order,
                    "to": item.order,
                    "shifted": shifted,
                    "scope_revision": scope_revision,
                }),
            },
        )?;

        tx.commit()?;
        tracing::debug!(
            collection = %kind,
            id = %item.id,
            from = previous_order,
            to = item.order,
            shifted,
            "{event_type}"
        );

        Ok(OrderedOpResult {
            scope_revision,
            item,
            shifted,
            event,
        })
    }
}

/// A caller-supplied `from` must match the stored order, whether or not the call moves.
fn check_from(item: &OrderedItemRow, from: Option<i64>) -> Result<(), StoreError> {
    match from {
        Some(expected) if expected != item.order => Err(StoreError::StaleOrder {
            expected,
            actual: item.order,
        }),
        _ => Ok(()),
    }
}

/// Frees the target slot by shifting the siblings between the two positions. The moved
/// record's new order is written by the caller together with its content.
fn move_within_scope_tx(
    tx: &Transaction<'_>,
    item: &mut OrderedItemRow,
    to: i64,
) -> Result<usize, StoreError> {
    let len = scope_len(tx, item.kind, item.parent_id.as_deref())?;
    check_target(to, len).map_err(|_| StoreError::OrderOutOfRange { order: to, len })?;

    let Some(shift) = plan_move(item.order, to) else {
        return Ok(0);
    };

    park_item_tx(tx, item.kind, &item.id)?;
    let shifted = shift_range_tx(tx, item.kind, item.parent_id.as_deref(), shift)?;
    item.order = to;
    Ok(shifted)
}
