//! Sync coordinator.
//!
//! Ties the local store to the remote store. Pulling merges the remote
//! collection into the local store with remote-wins semantics; every local
//! mutation is followed by a push of the affected entry.
//!
//! # Flow
//!
//! 1. [`SyncCoordinator::start`] builds the coordinator and pulls once
//! 2. `create` / `update` / `delete` commit locally, then mirror remotely
//! 3. [`SyncCoordinator::pull_from_remote`] may be called again at any time
//!
//! A remote failure never rolls back a local mutation. It is handed back in
//! [`MutationOutcome::remote`] so the caller decides what to show.

use crate::db::entries;
use crate::entry::{Entry, EntryDraft, EntryRepresentation, EntryUpdate, Mood};
use crate::errors::AppResult;
use crate::remote::RemoteClient;
use crate::store::EntryStore;
use rusqlite::Connection;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Counts from one merge of remote representations into the local store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Local entries overwritten from a matching representation.
    pub updated: usize,
    /// New local entries materialized from a representation.
    pub inserted: usize,
    /// Representations dropped for lacking an identifier.
    pub skipped: usize,
}

/// Result of a local mutation that is mirrored to the remote store.
#[derive(Debug)]
pub struct MutationOutcome<T> {
    /// What the local store committed.
    pub local: T,
    /// How mirroring the mutation to the remote store went.
    pub remote: AppResult<()>,
}

impl<T> MutationOutcome<T> {
    /// Returns true if the remote store accepted the mutation.
    pub fn is_synced(&self) -> bool {
        self.remote.is_ok()
    }
}

/// Merges representations into the local store through `conn`.
///
/// Every representation with a non-empty identifier either overwrites all
/// fields of the local entry holding that identifier or becomes a new local
/// entry. There is no timestamp comparison: the remote side always wins.
/// Representations without an identifier are skipped.
pub fn merge_into(
    conn: &Connection,
    representations: &[EntryRepresentation],
) -> AppResult<MergeReport> {
    let mut report = MergeReport::default();

    for representation in representations {
        let Some(identifier) = representation.sync_identifier() else {
            debug!("Skipping representation without identifier");
            report.skipped += 1;
            continue;
        };

        match entries::get_entry_by_identifier(conn, identifier)? {
            Some(existing) => {
                entries::apply_representation(conn, existing.local_id, representation)?;
                report.updated += 1;
            }
            None => {
                entries::insert_representation(conn, representation)?;
                report.inserted += 1;
            }
        }
    }

    Ok(report)
}

/// Coordinates the local store and the remote store.
#[derive(Clone)]
pub struct SyncCoordinator {
    store: EntryStore,
    remote: RemoteClient,
}

impl SyncCoordinator {
    /// Builds a coordinator without contacting the remote store.
    pub fn new(store: EntryStore, remote: RemoteClient) -> Self {
        Self { store, remote }
    }

    /// Builds a coordinator and pulls the remote collection once.
    ///
    /// The coordinator is returned even if the initial pull fails; the pull
    /// result is handed back alongside it.
    pub async fn start(
        store: EntryStore,
        remote: RemoteClient,
    ) -> (Self, AppResult<MergeReport>) {
        let coordinator = Self::new(store, remote);
        let initial_pull = coordinator.pull_from_remote().await;
        if let Err(e) = &initial_pull {
            warn!("Initial pull from remote store failed: {}", e);
        }
        (coordinator, initial_pull)
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn remote(&self) -> &RemoteClient {
        &self.remote
    }

    /// Fetches the remote collection and merges it into the local store.
    ///
    /// A failed fetch leaves the local store untouched.
    pub async fn pull_from_remote(&self) -> AppResult<MergeReport> {
        info!("Pulling entries from remote store");
        let collection = self.remote.fetch_all().await?;
        let representations: Vec<EntryRepresentation> = collection.into_values().collect();
        self.merge_representations(representations).await
    }

    /// Merges a batch of representations in one local transaction.
    pub async fn merge_representations(
        &self,
        representations: Vec<EntryRepresentation>,
    ) -> AppResult<MergeReport> {
        let report = self
            .store
            .run(move |store| store.with_transaction(|tx| merge_into(tx, &representations)))
            .await?;

        info!(
            "Merged remote entries: {} updated, {} inserted, {} skipped",
            report.updated, report.inserted, report.skipped
        );
        Ok(report)
    }

    /// Creates an entry locally and pushes it.
    ///
    /// The entry is assigned a fresh UUID as its identifier before it is
    /// persisted, so it is addressable on the remote store right away.
    pub async fn create(
        &self,
        title: impl Into<String>,
        body_text: impl Into<String>,
        mood: Mood,
    ) -> AppResult<MutationOutcome<Entry>> {
        let draft =
            EntryDraft::new(title, body_text, mood).with_identifier(Uuid::new_v4().to_string());
        let entry = self.store.run(move |store| store.create(&draft)).await?;
        let remote = self.push(&entry).await;
        Ok(MutationOutcome {
            local: entry,
            remote,
        })
    }

    /// Updates an entry locally and pushes the stored result.
    pub async fn update(
        &self,
        entry: &Entry,
        update: EntryUpdate,
    ) -> AppResult<MutationOutcome<Entry>> {
        let target = entry.clone();
        let updated = self
            .store
            .run(move |store| store.update(&target, &update))
            .await?;
        let remote = self.push(&updated).await;
        Ok(MutationOutcome {
            local: updated,
            remote,
        })
    }

    /// Deletes an entry locally and from the remote store.
    ///
    /// Both deletions are issued together and neither waits on the other's
    /// success: the local entry is removed even when the remote store is
    /// unreachable.
    pub async fn delete(&self, entry: &Entry) -> AppResult<MutationOutcome<()>> {
        let target = entry.clone();
        let (remote, local) = tokio::join!(
            self.remote.remove(entry),
            self.store.run(move |store| store.delete(&target))
        );

        if let Err(e) = &remote {
            warn!("Remote delete of entry {} failed: {}", entry.local_id, e);
        }
        local?;
        Ok(MutationOutcome { local: (), remote })
    }

    /// Pushes an entry to the remote store.
    pub async fn push(&self, entry: &Entry) -> AppResult<()> {
        let result = self.remote.push(entry).await;
        if let Err(e) = &result {
            warn!("Push of entry {} failed: {}", entry.local_id, e);
        }
        result
    }

    /// Lists all local entries, newest first.
    pub async fn entries(&self) -> AppResult<Vec<Entry>> {
        self.store.run(|store| store.list()).await
    }

    /// Finds a local entry by sync identifier.
    pub async fn find(&self, identifier: &str) -> AppResult<Option<Entry>> {
        let identifier = identifier.to_string();
        self.store
            .run(move |store| store.fetch_by_identifier(&identifier))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn setup_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::schema::create_tables(&conn).unwrap();
        conn
    }

    fn representation(identifier: Option<&str>, title: &str) -> EntryRepresentation {
        EntryRepresentation {
            title: title.to_string(),
            body_text: format!("{} body", title),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap(),
            identifier: identifier.map(str::to_string),
            mood: "happy".to_string(),
        }
    }

    #[test]
    fn test_merge_inserts_unknown_identifiers() {
        let conn = setup_test_db();

        let report = merge_into(&conn, &[representation(Some("id1"), "Hi")]).unwrap();

        assert_eq!(
            report,
            MergeReport {
                updated: 0,
                inserted: 1,
                skipped: 0
            }
        );
        let stored = entries::get_entry_by_identifier(&conn, "id1").unwrap().unwrap();
        assert_eq!(stored.to_representation(), representation(Some("id1"), "Hi"));
    }

    #[test]
    fn test_merge_overwrites_every_field_of_matching_entry() {
        let conn = setup_test_db();
        let draft = EntryDraft::new("Local", "Local body", Mood::Sad).with_identifier("id1");
        let local = entries::insert_entry(&conn, &draft, Utc::now()).unwrap();

        // Remote is older than local; it still wins
        let report = merge_into(&conn, &[representation(Some("id1"), "Remote")]).unwrap();
        assert_eq!(report.updated, 1);

        let stored = entries::get_entry(&conn, local.local_id).unwrap().unwrap();
        assert_eq!(stored.to_representation(), representation(Some("id1"), "Remote"));
        assert_eq!(entries::list_entries(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_merge_skips_representations_without_identifier() {
        let conn = setup_test_db();
        let draft = EntryDraft::new("Local", "Local body", Mood::Sad).with_identifier("id1");
        let local = entries::insert_entry(&conn, &draft, Utc::now()).unwrap();

        let report = merge_into(
            &conn,
            &[representation(None, "Nameless"), representation(Some(""), "Blank")],
        )
        .unwrap();

        assert_eq!(report.skipped, 2);
        assert_eq!(report.inserted + report.updated, 0);
        assert_eq!(entries::list_entries(&conn).unwrap(), vec![local]);
    }

    #[test]
    fn test_mutation_outcome_is_synced() {
        let synced = MutationOutcome {
            local: (),
            remote: Ok(()),
        };
        assert!(synced.is_synced());

        let diverged = MutationOutcome {
            local: (),
            remote: Err(crate::errors::SyncError::NoData.into()),
        };
        assert!(!diverged.is_synced());
    }
}
