//! Configuration management for journal-sync.
//!
//! This module handles loading and validating configuration settings from
//! environment variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `JOURNAL_SYNC_URL`: Base URL of the remote JSON store (required)
//! - `JOURNAL_SYNC_DB`: Path to the SQLite database (defaults to ~/.local/share/journal-sync/journal.db)
//! - `JOURNAL_SYNC_LOG_FORMAT`: `text` or `json` (defaults to `text`)
//! - `HOME`: Used for expanding the default database path

use crate::constants::{
    DEFAULT_DB_SUBPATH, ENV_VAR_DB_PATH, ENV_VAR_HOME, ENV_VAR_LOG_FORMAT, ENV_VAR_REMOTE_URL,
    LOG_FORMAT_JSON, LOG_FORMAT_TEXT, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use reqwest::Url;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for journal-sync.
///
/// # Examples
///
/// ```
/// use journal_sync::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     remote_url: "https://journal.example.com/entries".to_string(),
///     db_path: PathBuf::from("/var/lib/journal/journal.db"),
///     log_format: "text".to_string(),
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Base URL of the remote store. Entries live at `<remote_url>/<identifier>.json`.
    pub remote_url: String,

    /// Location of the local SQLite database.
    pub db_path: PathBuf,

    /// Log output format, `text` or `json`.
    pub log_format: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("remote_url", &self.remote_url)
            .field("db_path", &REDACTED_PLACEHOLDER)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The database path is expanded with `shellexpand` to handle `~` and
    /// environment variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - `JOURNAL_SYNC_URL` is not set
    /// - The database path expansion fails
    pub fn load() -> AppResult<Self> {
        let remote_url = env::var(ENV_VAR_REMOTE_URL).map_err(|_| {
            AppError::Config(format!(
                "{} is not set. Point it at the remote store, e.g. https://example.firebaseio.com/entries",
                ENV_VAR_REMOTE_URL
            ))
        })?;

        let db_path_str = env::var(ENV_VAR_DB_PATH).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DB_SUBPATH)
        });

        let expanded_path = shellexpand::full(&db_path_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let log_format =
            env::var(ENV_VAR_LOG_FORMAT).unwrap_or_else(|_| LOG_FORMAT_TEXT.to_string());

        Ok(Config {
            remote_url,
            db_path: PathBuf::from(expanded_path.into_owned()),
            log_format,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The remote URL is not an absolute `http` or `https` URL
    /// - The database path is empty or relative
    /// - The log format is neither `text` nor `json`
    pub fn validate(&self) -> AppResult<()> {
        let url = Url::parse(&self.remote_url)
            .map_err(|e| AppError::Config(format!("Invalid remote URL: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(format!(
                "Remote URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if url.cannot_be_a_base() {
            return Err(AppError::Config(
                "Remote URL cannot be used as a base for entry paths".to_string(),
            ));
        }

        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        if !self.db_path.is_absolute() {
            return Err(AppError::Config(
                "Database path must be an absolute path".to_string(),
            ));
        }

        if self.log_format != LOG_FORMAT_TEXT && self.log_format != LOG_FORMAT_JSON {
            return Err(AppError::Config(format!(
                "Invalid log format '{}', expected '{}' or '{}'",
                self.log_format, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            remote_url: "https://journal.example.com/entries".to_string(),
            db_path: PathBuf::from("/home/someone/private/journal.db"),
            log_format: LOG_FORMAT_TEXT.to_string(),
        }
    }

    #[test]
    fn test_debug_impl_redacts_db_path() {
        let debug_output = format!("{:?}", valid_config());

        assert!(debug_output.contains(REDACTED_PLACEHOLDER));
        assert!(!debug_output.contains("/home/someone/private"));
    }

    #[test]
    fn test_validate_accepts_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        for url in ["not a url", "ftp://example.com/entries", "mailto:someone@example.com"] {
            let mut config = valid_config();
            config.remote_url = url.to_string();
            assert!(
                matches!(config.validate(), Err(AppError::Config(_))),
                "expected {} to be rejected",
                url
            );
        }
    }

    #[test]
    fn test_validate_rejects_relative_db_path() {
        let mut config = valid_config();
        config.db_path = PathBuf::from("journal.db");
        let err = config.validate().unwrap_err();
        assert!(format!("{}", err).contains("absolute"));
    }

    #[test]
    fn test_validate_rejects_empty_db_path() {
        let mut config = valid_config();
        config.db_path = PathBuf::new();
        let err = config.validate().unwrap_err();
        assert!(format!("{}", err).contains("empty"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = valid_config();
        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
