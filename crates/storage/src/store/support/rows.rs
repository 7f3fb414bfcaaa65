#![forbid(unsafe_code)]

use super::super::{ItemContent, OrderedItemRow, StoreError};
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};
use ts_core::model::CollectionKind;

pub(in crate::store) const ITEM_COLUMNS: &str = "id, parent_id, ord, title_en, title_ar, body_en, body_ar, link_url, media_url, created_at_ms, updated_at_ms";

pub(in crate::store) fn item_from_row(
    kind: CollectionKind,
    row: &Row<'_>,
) -> rusqlite::Result<OrderedItemRow> {
    Ok(OrderedItemRow {
        kind,
        id: row.get(0)?,
        parent_id: row.get(1)?,
        order: row.get(2)?,
        content: ItemContent {
            title_en: row.get(3)?,
            title_ar: row.get(4)?,
            body_en: row.get(5)?,
            body_ar: row.get(6)?,
            link_url: row.get(7)?,
            media_url: row.get(8)?,
        },
        created_at_ms: row.get(9)?,
        updated_at_ms: row.get(10)?,
    })
}

/// Loads `id` only when it belongs to the given scope.
pub(in crate::store) fn load_item_in_scope(
    conn: &Connection,
    kind: CollectionKind,
    parent_id: Option<&str>,
    id: &str,
) -> Result<OrderedItemRow, StoreError> {
    let sql = format!(
        "SELECT {ITEM_COLUMNS} FROM {} WHERE id=?1 AND parent_id IS ?2",
        kind.as_str()
    );
    conn.query_row(&sql, params![id, parent_id], |row| item_from_row(kind, row))
        .optional()?
        .ok_or(StoreError::UnknownId)
}

pub(in crate::store) fn list_scope(
    conn: &Connection,
    kind: CollectionKind,
    parent_id: Option<&str>,
) -> Result<Vec<OrderedItemRow>, StoreError> {
    let sql = format!(
        "SELECT {ITEM_COLUMNS} FROM {} WHERE parent_id IS ?1 ORDER BY ord ASC, created_at_ms ASC, id ASC",
        kind.as_str()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![parent_id], |row| item_from_row(kind, row))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub(in crate::store) fn write_item_tx(
    tx: &Transaction<'_>,
    item: &OrderedItemRow,
) -> Result<(), StoreError> {
    let sql = format!(
        r#"
        UPDATE {} SET
          ord=?2, title_en=?3, title_ar=?4, body_en=?5, body_ar=?6,
          link_url=?7, media_url=?8, updated_at_ms=?9
        WHERE id=?1
        "#,
        item.kind.as_str()
    );
    let content = &item.content;
    tx.execute(
        &sql,
        params![
            item.id,
            item.order,
            content.title_en,
            content.title_ar,
            content.body_en,
            content.body_ar,
            content.link_url,
            content.media_url,
            item.updated_at_ms,
        ],
    )?;
    Ok(())
}
