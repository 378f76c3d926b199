//! Local store adapter.
//!
//! [`EntryStore`] wraps an explicitly constructed [`Database`] handle and
//! exposes the entry operations the sync layer needs. Each operation takes
//! its own pooled connection, so independent writes do not share a context.
//! Failures are returned to the caller, never swallowed.

use crate::db::entries;
use crate::db::Database;
use crate::entry::{Entry, EntryDraft, EntryUpdate};
use crate::errors::{AppResult, DatabaseError};
use chrono::Utc;
use rusqlite::Transaction;
use tracing::{debug, info};

/// Handle onto the local entry store.
#[derive(Clone)]
pub struct EntryStore {
    db: Database,
}

impl EntryStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persists a new entry stamped with the current time.
    pub fn create(&self, draft: &EntryDraft) -> AppResult<Entry> {
        let conn = self.db.get_conn()?;
        let entry = entries::insert_entry(&conn, draft, Utc::now())?;
        info!("Created local entry {}", entry.local_id);
        Ok(entry)
    }

    /// Overwrites an entry's fields.
    ///
    /// The entry is reloaded by its local id inside a write transaction, so
    /// the caller's copy may be stale. Returns the entry as stored.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the entry no longer exists.
    pub fn update(&self, entry: &Entry, update: &EntryUpdate) -> AppResult<Entry> {
        let local_id = entry.local_id;
        let updated = self.with_transaction(|tx| {
            if entries::get_entry(tx, local_id)?.is_none() {
                return Err(DatabaseError::NotFound(format!(
                    "Entry with id {} not found",
                    local_id
                ))
                .into());
            }
            entries::update_entry(tx, local_id, update)
        })?;
        info!("Updated local entry {}", local_id);
        Ok(updated)
    }

    /// Looks up an entry by sync identifier.
    ///
    /// `Ok(None)` means no entry matched; a failed query is an `Err`.
    pub fn fetch_by_identifier(&self, identifier: &str) -> AppResult<Option<Entry>> {
        let conn = self.db.get_conn()?;
        entries::get_entry_by_identifier(&conn, identifier)
    }

    /// Looks up an entry by local id.
    pub fn get(&self, local_id: i64) -> AppResult<Option<Entry>> {
        let conn = self.db.get_conn()?;
        entries::get_entry(&conn, local_id)
    }

    /// Lists all entries, newest first.
    pub fn list(&self) -> AppResult<Vec<Entry>> {
        let conn = self.db.get_conn()?;
        entries::list_entries(&conn)
    }

    /// Removes an entry from the local store.
    pub fn delete(&self, entry: &Entry) -> AppResult<()> {
        let conn = self.db.get_conn()?;
        entries::delete_entry(&conn, entry.local_id)?;
        info!("Deleted local entry {}", entry.local_id);
        Ok(())
    }

    /// Runs `f` inside a single transaction, committing only if it succeeds.
    pub fn with_transaction<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> AppResult<T>,
    {
        let mut conn = self.db.get_conn()?;
        let tx = conn.transaction().map_err(DatabaseError::Sqlite)?;
        let value = f(&tx)?;
        tx.commit().map_err(DatabaseError::Sqlite)?;
        debug!("Transaction committed");
        Ok(value)
    }

    /// Runs a store operation on the blocking thread pool.
    ///
    /// SQLite calls block, so async callers go through here instead of
    /// calling the store directly from a runtime worker.
    pub async fn run<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&EntryStore) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| DatabaseError::Custom(format!("Store worker failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Mood;
    use crate::errors::AppError;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, EntryStore) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("journal.db")).unwrap();
        db.initialize_schema().unwrap();
        (temp_dir, EntryStore::new(db))
    }

    #[test]
    fn test_create_stamps_current_time() {
        let (_dir, store) = setup_store();
        let before = Utc::now();

        let entry = store
            .create(&EntryDraft::new("Title", "Body", Mood::Happy))
            .unwrap();

        assert!(entry.timestamp >= before);
        assert!(entry.identifier.is_none());
        assert_eq!(store.get(entry.local_id).unwrap(), Some(entry));
    }

    #[test]
    fn test_update_reloads_by_local_id() {
        let (_dir, store) = setup_store();
        let entry = store
            .create(&EntryDraft::new("Title", "Body", Mood::Happy).with_identifier("abc"))
            .unwrap();

        // A stale copy still addresses the same record
        let mut stale = entry.clone();
        stale.title = "stale".to_string();

        let updated = store
            .update(&stale, &EntryUpdate::new("Fresh", "New body").mood(Mood::Sad))
            .unwrap();

        assert_eq!(updated.local_id, entry.local_id);
        assert_eq!(updated.title, "Fresh");
        assert_eq!(updated.mood, "sad");
        assert_eq!(updated.identifier.as_deref(), Some("abc"));
    }

    #[test]
    fn test_update_deleted_entry_fails() {
        let (_dir, store) = setup_store();
        let entry = store
            .create(&EntryDraft::new("Title", "Body", Mood::Happy))
            .unwrap();
        store.delete(&entry).unwrap();

        let result = store.update(&entry, &EntryUpdate::new("t", "b"));
        assert!(matches!(
            result,
            Err(AppError::Database(DatabaseError::NotFound(_)))
        ));
    }

    #[test]
    fn test_fetch_by_identifier() {
        let (_dir, store) = setup_store();
        let entry = store
            .create(&EntryDraft::new("Title", "Body", Mood::Neutral).with_identifier("abc"))
            .unwrap();

        assert_eq!(store.fetch_by_identifier("abc").unwrap(), Some(entry));
        assert_eq!(store.fetch_by_identifier("nope").unwrap(), None);
    }

    #[test]
    fn test_failed_transaction_rolls_back() {
        let (_dir, store) = setup_store();

        let result: AppResult<()> = store.with_transaction(|tx| {
            entries::insert_entry(tx, &EntryDraft::new("a", "b", Mood::Sad), Utc::now())?;
            Err(DatabaseError::Custom("boom".to_string()).into())
        });

        assert!(result.is_err());
        assert!(store.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_on_blocking_pool() {
        let (_dir, store) = setup_store();

        let entry = store
            .run(|s| s.create(&EntryDraft::new("async", "body", Mood::Happy)))
            .await
            .unwrap();

        let listed = store.run(|s| s.list()).await.unwrap();
        assert_eq!(listed, vec![entry]);
    }
}
