//! Entry CRUD operations.
//!
//! This module provides functions for creating, reading, updating, and
//! deleting journal entries in the database. Every function accepts either a
//! connection or a transaction (`Transaction` derefs to `Connection`).

use crate::entry::{timestamp, Entry, EntryDraft, EntryRepresentation, EntryUpdate};
use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

const ENTRY_COLUMNS: &str = "id, identifier, title, body_text, timestamp, mood";

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    let raw_timestamp: String = row.get(4)?;
    let timestamp = timestamp::parse(&raw_timestamp).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Entry {
        local_id: row.get(0)?,
        identifier: row.get(1)?,
        title: row.get(2)?,
        body_text: row.get(3)?,
        timestamp,
        mood: row.get(5)?,
    })
}

fn not_found(local_id: i64) -> DatabaseError {
    DatabaseError::NotFound(format!("Entry with id {} not found", local_id))
}

/// Inserts a new entry built from a draft and returns it.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the draft carries an
/// identifier that is already in use.
pub fn insert_entry(
    conn: &Connection,
    draft: &EntryDraft,
    created_at: DateTime<Utc>,
) -> AppResult<Entry> {
    debug!("Inserting entry with identifier {:?}", draft.identifier);

    conn.execute(
        "INSERT INTO entries (identifier, title, body_text, timestamp, mood) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            draft.identifier,
            draft.title,
            draft.body_text,
            timestamp::format_stored(&created_at),
            draft.mood.as_str()
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    let local_id = conn.last_insert_rowid();
    debug!("Entry inserted with id {}", local_id);

    Ok(Entry {
        local_id,
        identifier: draft.identifier.clone(),
        title: draft.title.clone(),
        body_text: draft.body_text.clone(),
        timestamp: created_at,
        mood: draft.mood.as_str().to_string(),
    })
}

/// Materializes a new local entry from a remote representation.
pub fn insert_representation(
    conn: &Connection,
    representation: &EntryRepresentation,
) -> AppResult<Entry> {
    debug!(
        "Inserting entry from representation {:?}",
        representation.identifier
    );

    conn.execute(
        "INSERT INTO entries (identifier, title, body_text, timestamp, mood) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            representation.identifier,
            representation.title,
            representation.body_text,
            timestamp::format_stored(&representation.timestamp),
            representation.mood
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(Entry {
        local_id: conn.last_insert_rowid(),
        identifier: representation.identifier.clone(),
        title: representation.title.clone(),
        body_text: representation.body_text.clone(),
        timestamp: representation.timestamp,
        mood: representation.mood.clone(),
    })
}

/// Retrieves an entry by its local row id.
///
/// Returns `Ok(None)` if no entry has that id.
pub fn get_entry(conn: &Connection, local_id: i64) -> AppResult<Option<Entry>> {
    debug!("Getting entry with id {}", local_id);

    conn.query_row(
        &format!("SELECT {} FROM entries WHERE id = ?1", ENTRY_COLUMNS),
        params![local_id],
        entry_from_row,
    )
    .optional()
    .map_err(|e| DatabaseError::Sqlite(e).into())
}

/// Retrieves an entry by its sync identifier.
///
/// Returns `Ok(None)` when no entry matches. A failing query is reported as
/// an error, never as `None`.
pub fn get_entry_by_identifier(conn: &Connection, identifier: &str) -> AppResult<Option<Entry>> {
    debug!("Getting entry with identifier {}", identifier);

    conn.query_row(
        &format!("SELECT {} FROM entries WHERE identifier = ?1", ENTRY_COLUMNS),
        params![identifier],
        entry_from_row,
    )
    .optional()
    .map_err(|e| DatabaseError::Sqlite(e).into())
}

/// Lists all entries, newest first.
pub fn list_entries(conn: &Connection) -> AppResult<Vec<Entry>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM entries ORDER BY timestamp DESC, id DESC",
            ENTRY_COLUMNS
        ))
        .map_err(DatabaseError::Sqlite)?;

    let entries = stmt
        .query_map([], entry_from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Listed {} entries", entries.len());
    Ok(entries)
}

/// Overwrites the title, body, timestamp, and mood of an entry.
///
/// The identifier is left untouched. Returns the entry as stored afterwards.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if no entry has `local_id`.
pub fn update_entry(conn: &Connection, local_id: i64, update: &EntryUpdate) -> AppResult<Entry> {
    debug!("Updating entry {}", local_id);

    let rows_affected = conn
        .execute(
            "UPDATE entries SET title = ?1, body_text = ?2, timestamp = ?3, mood = ?4 WHERE id = ?5",
            params![
                update.title,
                update.body_text,
                timestamp::format_stored(&update.timestamp),
                update.mood.as_str(),
                local_id
            ],
        )
        .map_err(DatabaseError::Sqlite)?;

    if rows_affected == 0 {
        return Err(not_found(local_id).into());
    }

    get_entry(conn, local_id)?.ok_or_else(|| not_found(local_id).into())
}

/// Overwrites every field of an entry, identifier included, from a representation.
pub fn apply_representation(
    conn: &Connection,
    local_id: i64,
    representation: &EntryRepresentation,
) -> AppResult<()> {
    debug!(
        "Applying representation {:?} to entry {}",
        representation.identifier, local_id
    );

    let rows_affected = conn
        .execute(
            "UPDATE entries SET identifier = ?1, title = ?2, body_text = ?3, timestamp = ?4, mood = ?5 WHERE id = ?6",
            params![
                representation.identifier,
                representation.title,
                representation.body_text,
                timestamp::format_stored(&representation.timestamp),
                representation.mood,
                local_id
            ],
        )
        .map_err(DatabaseError::Sqlite)?;

    if rows_affected == 0 {
        return Err(not_found(local_id).into());
    }

    Ok(())
}

/// Deletes an entry by its local row id.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if no entry has `local_id`.
pub fn delete_entry(conn: &Connection, local_id: i64) -> AppResult<()> {
    debug!("Deleting entry {}", local_id);

    let rows_affected = conn
        .execute("DELETE FROM entries WHERE id = ?1", params![local_id])
        .map_err(DatabaseError::Sqlite)?;

    if rows_affected == 0 {
        return Err(not_found(local_id).into());
    }

    Ok(())
}
