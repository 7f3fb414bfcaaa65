#![forbid(unsafe_code)]

use super::{EventRow, EventsSinceRequest, SqliteStore, StoreError, to_sqlite_i64};
use rusqlite::params;

impl SqliteStore {
    /// Audit events with `seq > since_seq`, oldest first.
    pub fn events_since(&self, request: EventsSinceRequest) -> Result<Vec<EventRow>, StoreError> {
        let limit = to_sqlite_i64(request.limit)?;
        let collection = request.kind.map(|kind| kind.as_str());
        let mut stmt = self.conn.prepare(
            r#"
            SELECT seq, ts_ms, collection, item_id, type, payload_json
            FROM events
            WHERE seq > ?1 AND (?2 IS NULL OR collection = ?2)
            ORDER BY seq ASC
            LIMIT ?3
            "#,
        )?;
        let rows = stmt.query_map(params![request.since_seq, collection, limit], |row| {
            Ok(EventRow {
                seq: row.get(0)?,
                ts_ms: row.get(1)?,
                kind: row.get(2)?,
                item_id: row.get(3)?,
                event_type: row.get(4)?,
                payload_json: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
