#![forbid(unsafe_code)]

use super::super::{ScopeRef, StoreError};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use ts_core::ids::ItemId;
use ts_core::model::CollectionKind;

/// Checks that the scope is well formed for its collection and that its parent exists.
pub(in crate::store) fn resolve_scope(conn: &Connection, scope: &ScopeRef) -> Result<(), StoreError> {
    match (scope.kind.parent(), scope.parent_id.as_deref()) {
        (None, None) => Ok(()),
        (None, Some(_)) => Err(StoreError::InvalidInput(
            "parent_id is not allowed for a global collection",
        )),
        (Some(_), None) => Err(StoreError::InvalidInput(
            "parent_id is required for a scoped collection",
        )),
        (Some(parent_kind), Some(parent_id)) => {
            ItemId::try_new(parent_id).map_err(|_| StoreError::InvalidInput("invalid parent_id"))?;
            let exists = conn
                .query_row(
                    &format!("SELECT 1 FROM {} WHERE id=?1", parent_kind.as_str()),
                    params![parent_id],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if exists {
                Ok(())
            } else {
                Err(StoreError::UnknownScope)
            }
        }
    }
}

pub(in crate::store) fn scope_len(
    conn: &Connection,
    kind: CollectionKind,
    parent_id: Option<&str>,
) -> Result<usize, StoreError> {
    let count: i64 = conn.query_row(
        &format!(
            "SELECT COUNT(1) FROM {} WHERE parent_id IS ?1",
            kind.as_str()
        ),
        params![parent_id],
        |row| row.get(0),
    )?;
    usize::try_from(count).map_err(|_| StoreError::InvalidInput("numeric overflow"))
}

pub(in crate::store) fn scope_revision(conn: &Connection, scope: &ScopeRef) -> Result<i64, StoreError> {
    let revision = conn
        .query_row(
            "SELECT revision FROM scope_revisions WHERE collection=?1 AND parent_key=?2",
            params![scope.kind.as_str(), scope.parent_key()],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(revision.unwrap_or(0))
}

/// Advances the scope revision, failing closed when the caller saw an older one.
pub(in crate::store) fn bump_scope_revision_tx(
    tx: &Transaction<'_>,
    scope: &ScopeRef,
    expected_revision: Option<i64>,
    now_ms: i64,
) -> Result<i64, StoreError> {
    let current = scope_revision(tx, scope)?;

    if let Some(expected) = expected_revision
        && expected != current
    {
        return Err(StoreError::RevisionMismatch {
            expected,
            actual: current,
        });
    }

    let next = current + 1;
    tx.execute(
        r#"
        INSERT INTO scope_revisions(collection, parent_key, revision, updated_at_ms)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(collection, parent_key) DO UPDATE SET
          revision=excluded.revision, updated_at_ms=excluded.updated_at_ms
        "#,
        params![scope.kind.as_str(), scope.parent_key(), next, now_ms],
    )?;
    Ok(next)
}

/// Forgets the revisions of scopes owned by a deleted parent record.
pub(in crate::store) fn drop_child_scopes_tx(
    tx: &Transaction<'_>,
    parent_kind: CollectionKind,
    parent_id: &str,
) -> Result<(), StoreError> {
    for child in parent_kind.children() {
        tx.execute(
            "DELETE FROM scope_revisions WHERE collection=?1 AND parent_key=?2",
            params![child.as_str(), parent_id],
        )?;
    }
    Ok(())
}
