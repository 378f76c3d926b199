/*!
# journal-sync

journal-sync keeps a local store of journal entries in step with a remote JSON
store reachable over HTTP. Entries are persisted locally in SQLite; every
local mutation is mirrored to the remote store, and the remote collection is
merged back into the local store on startup.

## Architecture

- `entry`: Entry, wire representation, and mood types
- `db`: SQLite connection pool, schema, and entry queries
- `store`: Local store adapter over an injected database handle
- `remote`: HTTP client for the remote store
- `sync`: Coordinator that merges remote state and pushes local mutations
- `config`, `errors`, `logging`, `cli`: ambient infrastructure

## Usage Example

```rust,no_run
use journal_sync::db::Database;
use journal_sync::entry::Mood;
use journal_sync::remote::RemoteClient;
use journal_sync::store::EntryStore;
use journal_sync::sync::SyncCoordinator;
use std::path::Path;

# async fn run() -> journal_sync::AppResult<()> {
let db = Database::open(Path::new("/tmp/journal.db"))?;
db.initialize_schema()?;

let remote = RemoteClient::new("https://example.firebaseio.com/entries")?;
let (sync, initial_pull) = SyncCoordinator::start(EntryStore::new(db), remote).await;
initial_pull?;

let outcome = sync.create("Morning", "Coffee and rain", Mood::Happy).await?;
outcome.remote?;
# Ok(())
# }
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Constants shared across the crate
pub mod constants;
/// SQLite persistence
pub mod db;
/// Entry types and wire representation
pub mod entry;
/// Error types and utilities for error handling
pub mod errors;
/// Tracing subscriber setup
pub mod logging;
/// Remote store HTTP client
pub mod remote;
/// Local store adapter
pub mod store;
/// Sync coordinator
pub mod sync;

// Re-export important types for convenience
pub use config::Config;
pub use entry::{Entry, EntryRepresentation, Mood};
pub use errors::{AppError, AppResult};
pub use sync::{MergeReport, MutationOutcome, SyncCoordinator};
