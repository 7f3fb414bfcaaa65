#![forbid(unsafe_code)]

use super::super::StoreError;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use ts_core::model::CollectionKind;

pub(in crate::store) const SCHEMA_VERSION: &str = "ts1";

const CORE_SQL: &str = r#"
PRAGMA journal_mode=WAL;
PRAGMA synchronous=NORMAL;

CREATE TABLE IF NOT EXISTS meta (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS counters (
  name TEXT PRIMARY KEY,
  value INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS scope_revisions (
  collection TEXT NOT NULL,
  parent_key TEXT NOT NULL,
  revision INTEGER NOT NULL,
  updated_at_ms INTEGER NOT NULL,
  PRIMARY KEY (collection, parent_key)
);

CREATE TABLE IF NOT EXISTS events (
  seq INTEGER PRIMARY KEY AUTOINCREMENT,
  ts_ms INTEGER NOT NULL,
  collection TEXT NOT NULL,
  item_id TEXT,
  type TEXT NOT NULL,
  payload_json TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_events_collection_seq ON events(collection, seq);
"#;

fn collection_sql(kind: CollectionKind) -> String {
    let table = kind.as_str();
    let parent_column = match kind.parent() {
        Some(parent) => format!(
            "parent_id TEXT NOT NULL REFERENCES {}(id) ON DELETE CASCADE",
            parent.as_str()
        ),
        None => "parent_id TEXT CHECK(parent_id IS NULL)".to_string(),
    };
    // One slot per order inside a scope; shifts park rows in negative space to stay unique.
    let order_index = if kind.is_scoped() {
        format!("CREATE UNIQUE INDEX IF NOT EXISTS idx_{table}_order ON {table}(parent_id, ord);")
    } else {
        format!("CREATE UNIQUE INDEX IF NOT EXISTS idx_{table}_order ON {table}(ord);")
    };
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {table} (
  id TEXT PRIMARY KEY,
  {parent_column},
  ord INTEGER NOT NULL,
  title_en TEXT NOT NULL CHECK(length(trim(title_en)) > 0),
  title_ar TEXT NOT NULL,
  body_en TEXT,
  body_ar TEXT,
  link_url TEXT,
  media_url TEXT,
  created_at_ms INTEGER NOT NULL,
  updated_at_ms INTEGER NOT NULL
);
{order_index}
"#
    )
}

pub(in crate::store) fn full_schema_sql() -> String {
    let mut sql = String::from(CORE_SQL);
    for kind in CollectionKind::ALL {
        sql.push_str(&collection_sql(kind));
    }
    sql
}

/// Refuses to open a database written by an unrelated tool or an incompatible schema.
pub(in crate::store) fn preflight_gate(conn: &Connection) -> Result<(), StoreError> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
    )?;
    let mut rows = stmt.query([])?;
    let mut tables = BTreeSet::new();
    while let Some(row) = rows.next()? {
        tables.insert(row.get::<_, String>(0)?);
    }

    if tables.is_empty() {
        return Ok(());
    }

    let known: BTreeSet<&str> = ["meta", "counters", "scope_revisions", "events"]
        .into_iter()
        .chain(CollectionKind::ALL.into_iter().map(CollectionKind::as_str))
        .collect();
    if tables.iter().any(|table| !known.contains(table.as_str())) {
        return Err(StoreError::InvalidInput(
            "RESET_REQUIRED: unsupported tables detected",
        ));
    }
    if !tables.contains("meta") {
        return Ok(());
    }

    let version = conn
        .query_row(
            "SELECT value FROM meta WHERE key='schema_version'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    match version.as_deref() {
        None => Ok(()),
        Some(SCHEMA_VERSION) => Ok(()),
        Some(_) => Err(StoreError::InvalidInput(
            "RESET_REQUIRED: schema version mismatch",
        )),
    }
}

pub(in crate::store) fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(&full_schema_sql())?;
    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", SCHEMA_VERSION],
    )?;
    Ok(())
}
