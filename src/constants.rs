//! Constants used throughout the crate.
//!
//! Centralized so that the binary, the configuration layer, and the tests all
//! agree on names and defaults.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "journal-sync";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Mirror journal entries between a local store and a remote JSON store";

// Logging
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable holding the remote store base URL.
pub const ENV_VAR_REMOTE_URL: &str = "JOURNAL_SYNC_URL";
/// Environment variable holding the local database path.
pub const ENV_VAR_DB_PATH: &str = "JOURNAL_SYNC_DB";
/// Environment variable selecting the log format.
pub const ENV_VAR_LOG_FORMAT: &str = "JOURNAL_SYNC_LOG_FORMAT";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default database location, relative to the user's home directory.
pub const DEFAULT_DB_SUBPATH: &str = ".local/share/journal-sync/journal.db";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Remote Store
/// Extension appended to every remote resource path.
pub const REMOTE_RESOURCE_EXTENSION: &str = ".json";

// Database
/// Maximum number of pooled SQLite connections.
pub const DB_POOL_SIZE: u32 = 5;
/// How long a connection waits on a locked database before failing.
pub const DB_BUSY_TIMEOUT_MS: u64 = 5_000;
