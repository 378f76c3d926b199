//! Error handling utilities for the journal-sync crate.
//!
//! This module provides the central error type `AppError`, which represents all
//! failure conditions of the local store, the remote sync client, and the
//! configuration layer, as well as the convenience alias `AppResult`.

use thiserror::Error;

/// Represents specific error cases that can occur while talking to the remote store.
///
/// None of these are retried. A remote failure is reported to the caller but
/// never rolls back a local mutation that has already been committed.
///
/// # Examples
///
/// ```
/// use journal_sync::errors::SyncError;
///
/// let error = SyncError::MissingIdentifier;
/// assert!(format!("{}", error).contains("identifier"));
/// ```
#[derive(Debug, Error)]
pub enum SyncError {
    /// The entry has never been assigned an identifier, so it has no remote address.
    #[error("Entry has no identifier and cannot be addressed on the remote store")]
    MissingIdentifier,

    /// Serializing the entry to its wire representation failed.
    #[error("Failed to encode entry representation: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The remote payload was not valid JSON or did not match the representation schema.
    #[error("Failed to decode remote entries: {0}")]
    Decoding(#[source] serde_json::Error),

    /// Network-layer failure (connection refused, DNS, TLS, ...).
    #[error("Remote store unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// The remote store answered without a response body where one was expected.
    #[error("Remote store returned no data")]
    NoData,

    /// The remote store answered with a non-success HTTP status.
    #[error("Remote store responded with HTTP {status}: {body}")]
    UnexpectedStatus {
        /// The HTTP status code
        status: u16,
        /// The response body, if any
        body: String,
    },
}

/// Represents specific error cases that can occur during local database operations.
///
/// # Examples
///
/// ```
/// use journal_sync::errors::DatabaseError;
///
/// let error = DatabaseError::NotFound("Entry with id 123 not found".to_string());
/// assert!(format!("{}", error).contains("not found"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}")]
    Pool(#[from] r2d2::Error),

    /// Requested entry not found in database.
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Custom database error with detailed message.
    #[error("Database error: {0}")]
    Custom(String),
}

/// Represents all possible errors that can occur in the journal-sync crate.
///
/// Note: This type does not implement `Clone` to avoid losing error context when
/// cloning `std::io::Error` or `reqwest::Error` values.
///
/// # Examples
///
/// ```
/// use journal_sync::errors::{AppError, SyncError};
///
/// let error: AppError = SyncError::NoData.into();
/// assert_eq!(format!("{}", error), "Sync error: Remote store returned no data");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors raised by the local persistent store.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors raised while mirroring entries to or from the remote store.
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),
}

impl AppError {
    /// Returns the inner `SyncError` when this error came from the remote store.
    pub fn as_sync(&self) -> Option<&SyncError> {
        match self {
            AppError::Sync(inner) => Some(inner),
            _ => None,
        }
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
