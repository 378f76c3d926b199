//! Database schema definitions and initialization.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::Connection;
use tracing::debug;

/// Current schema version, recorded in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates all database tables and indexes.
///
/// This function is idempotent - it uses `CREATE TABLE IF NOT EXISTS`
/// so it's safe to call multiple times.
///
/// # Tables
///
/// - `entries`: Journal entries. `identifier` is the sync identity and is
///   NULL for entries that have never been assigned one; SQLite allows any
///   number of NULLs under the UNIQUE constraint.
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    debug!("Creating database tables");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            identifier TEXT UNIQUE,
            title TEXT NOT NULL,
            body_text TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            mood TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_timestamp ON entries(timestamp DESC);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)
        .map_err(DatabaseError::Sqlite)?;

    debug!("Database tables created successfully");
    Ok(())
}

/// Reads the schema version stored in the database.
pub fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let version = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(DatabaseError::Sqlite)?;
    Ok(version)
}
