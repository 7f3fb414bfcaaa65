#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::{OrderedItemRow, ScopeListing, ScopeRef, SqliteStore, StoreError};
use rusqlite::{OptionalExtension, params};
use ts_core::model::CollectionKind;

impl SqliteStore {
    /// Revision and items come from one read transaction, so they describe the same snapshot.
    pub fn ordered_list(&self, scope: &ScopeRef) -> Result<ScopeListing, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        resolve_scope(&tx, scope)?;
        let listing = ScopeListing {
            revision: scope_revision(&tx, scope)?,
            items: list_scope(&tx, scope.kind, scope.parent_id.as_deref())?,
        };
        tx.commit()?;
        Ok(listing)
    }

    pub fn ordered_get(&self, kind: CollectionKind, id: &str) -> Result<OrderedItemRow, StoreError> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM {} WHERE id=?1", kind.as_str());
        self.conn
            .query_row(&sql, params![id], |row| item_from_row(kind, row))
            .optional()?
            .ok_or(StoreError::UnknownId)
    }

    /// The record in slot 0 of a scope, if the scope has any records.
    pub fn ordered_first(&self, scope: &ScopeRef) -> Result<Option<OrderedItemRow>, StoreError> {
        resolve_scope(&self.conn, scope)?;
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM {} WHERE parent_id IS ?1 ORDER BY ord ASC LIMIT 1",
            scope.kind.as_str()
        );
        Ok(self
            .conn
            .query_row(&sql, params![scope.parent_id], |row| {
                item_from_row(scope.kind, row)
            })
            .optional()?)
    }

    pub fn scope_revision(&self, scope: &ScopeRef) -> Result<i64, StoreError> {
        resolve_scope(&self.conn, scope)?;
        scope_revision(&self.conn, scope)
    }
}
