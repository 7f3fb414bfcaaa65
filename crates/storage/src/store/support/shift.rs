#![forbid(unsafe_code)]

use super::super::StoreError;
use rusqlite::{Transaction, params};
use ts_core::model::CollectionKind;
use ts_core::order::Shift;

// SQLite checks unique indexes row by row during an UPDATE, so a plain `ord = ord + 1`
// over a run collides with its own neighbours. Rows are first parked in negative space
// (each at a distinct slot <= -2) and then flipped back in a second statement.

const PARKED_ORDER: i64 = -1;

/// Frees the slot of a record that is about to move; the caller writes its final order.
pub(in crate::store) fn park_item_tx(
    tx: &Transaction<'_>,
    kind: CollectionKind,
    id: &str,
) -> Result<(), StoreError> {
    tx.execute(
        &format!("UPDATE {} SET ord=?2 WHERE id=?1", kind.as_str()),
        params![id, PARKED_ORDER],
    )?;
    Ok(())
}

/// Moves every sibling in `shift.lo..=shift.hi` by `shift.delta`. Returns the number of rows moved.
pub(in crate::store) fn shift_range_tx(
    tx: &Transaction<'_>,
    kind: CollectionKind,
    parent_id: Option<&str>,
    shift: Shift,
) -> Result<usize, StoreError> {
    let table = kind.as_str();
    let moved = tx.execute(
        &format!(
            "UPDATE {table} SET ord = -(ord + ?4) - 2 WHERE parent_id IS ?1 AND ord BETWEEN ?2 AND ?3"
        ),
        params![parent_id, shift.lo, shift.hi, shift.delta],
    )?;
    unpark_tx(tx, kind, parent_id)?;
    Ok(moved)
}

/// Rewrites the given `(id, order)` pairs without tripping the unique order index.
pub(in crate::store) fn renumber_tx(
    tx: &Transaction<'_>,
    kind: CollectionKind,
    parent_id: Option<&str>,
    assignments: &[(String, i64)],
) -> Result<usize, StoreError> {
    if assignments.is_empty() {
        return Ok(0);
    }
    let table = kind.as_str();
    for (id, order) in assignments {
        tx.execute(
            &format!("UPDATE {table} SET ord = -(?2) - 2 WHERE id=?1"),
            params![id, order],
        )?;
    }
    unpark_tx(tx, kind, parent_id)?;
    Ok(assignments.len())
}

fn unpark_tx(
    tx: &Transaction<'_>,
    kind: CollectionKind,
    parent_id: Option<&str>,
) -> Result<(), StoreError> {
    tx.execute(
        &format!(
            "UPDATE {} SET ord = -(ord + 2) WHERE parent_id IS ?1 AND ord <= -2",
            kind.as_str()
        ),
        params![parent_id],
    )?;
    Ok(())
}
