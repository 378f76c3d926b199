/*!
# journal-sync

Command-line front end for the journal sync layer. Every invocation opens the
local store, pulls the remote collection once, then runs one command.

## Usage

```
journal-sync [OPTIONS] <COMMAND>

Commands:
  pull    Pull the remote collection into the local store
  list    List local entries, newest first
  create  Create an entry and push it
  update  Replace an entry's fields and push it
  delete  Delete an entry locally and remotely
  push    Push an existing entry to the remote store

Options:
      --log-format <LOG_FORMAT>  Log output format (text or json)
  -v, --verbose                  Print verbose output
```

## Configuration

- `JOURNAL_SYNC_URL`: Base URL of the remote JSON store (required)
- `JOURNAL_SYNC_DB`: Path to the SQLite database (defaults to ~/.local/share/journal-sync/journal.db)
- `JOURNAL_SYNC_LOG_FORMAT`: `text` or `json`
*/

use journal_sync::cli::{CliArgs, Command};
use journal_sync::config::Config;
use journal_sync::db::Database;
use journal_sync::entry::{timestamp, Entry, EntryUpdate};
use journal_sync::errors::{AppResult, DatabaseError};
use journal_sync::logging;
use journal_sync::remote::RemoteClient;
use journal_sync::store::EntryStore;
use journal_sync::sync::SyncCoordinator;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = CliArgs::parse();

    let mut config = Config::load()?;
    if let Some(format) = &args.log_format {
        config.log_format = format.clone();
    }
    config.validate()?;

    logging::init(&config.log_format, args.verbose)?;
    info!("Starting journal-sync");
    debug!("CLI arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;
    let store = EntryStore::new(db);
    let remote = RemoteClient::new(&config.remote_url)?;

    let (coordinator, initial_pull) = SyncCoordinator::start(store, remote).await;

    match args.command {
        Command::Pull => {
            let report = initial_pull?;
            println!(
                "Pulled: {} updated, {} inserted, {} skipped",
                report.updated, report.inserted, report.skipped
            );
        }
        Command::List => {
            for entry in coordinator.entries().await? {
                println!("{}", format_entry(&entry));
            }
        }
        Command::Create { title, body, mood } => {
            let outcome = coordinator.create(title, body, mood).await?;
            println!("{}", format_entry(&outcome.local));
            outcome.remote?;
        }
        Command::Update {
            identifier,
            title,
            body,
            mood,
            timestamp,
        } => {
            let entry = find_entry(&coordinator, &identifier).await?;
            let mut update = EntryUpdate::new(title, body).mood(mood);
            if let Some(timestamp) = timestamp {
                update = update.timestamp(timestamp);
            }
            let outcome = coordinator.update(&entry, update).await?;
            println!("{}", format_entry(&outcome.local));
            outcome.remote?;
        }
        Command::Delete { identifier } => {
            let entry = find_entry(&coordinator, &identifier).await?;
            let outcome = coordinator.delete(&entry).await?;
            println!("Deleted {}", identifier);
            outcome.remote?;
        }
        Command::Push { identifier } => {
            let entry = find_entry(&coordinator, &identifier).await?;
            coordinator.push(&entry).await?;
            println!("Pushed {}", identifier);
        }
    }

    info!("journal-sync finished");
    Ok(())
}

async fn find_entry(coordinator: &SyncCoordinator, identifier: &str) -> AppResult<Entry> {
    coordinator.find(identifier).await?.ok_or_else(|| {
        DatabaseError::NotFound(format!("No entry with identifier {}", identifier)).into()
    })
}

fn format_entry(entry: &Entry) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        entry.identifier.as_deref().unwrap_or("-"),
        timestamp::format(&entry.timestamp),
        entry.mood,
        entry.title
    )
}
