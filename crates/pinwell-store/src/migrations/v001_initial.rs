//! v001 -- Initial schema creation.
//!
//! Creates the single `session_snapshot` table.  The persisted session
//! subset lives in one JSON blob under a fixed row id, rewritten whole on
//! every mutation.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS session_snapshot (
    id         INTEGER PRIMARY KEY CHECK (id = 1),
    json       TEXT NOT NULL,                -- serialized SessionSnapshot
    updated_at TEXT NOT NULL                 -- ISO-8601 / RFC-3339
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
