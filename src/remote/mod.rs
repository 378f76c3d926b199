//! HTTP client for the remote JSON store.
//!
//! The remote store is a single REST resource. The whole collection lives at
//! `<base>.json` as an object keyed by identifier, and each entry lives at
//! `<base>/<identifier>.json`. Requests carry no authentication and are never
//! retried.

use crate::constants::REMOTE_RESOURCE_EXTENSION;
use crate::entry::{Entry, EntryRepresentation};
use crate::errors::{AppError, AppResult, SyncError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Client for mirroring entries to the remote store.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: Url,
    client: Client,
}

impl RemoteClient {
    /// Creates a new client for the store rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `base_url` is not a URL that entry paths
    /// can be appended to.
    pub fn new(base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid remote URL '{}': {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "Remote URL '{}' cannot be used as a base for entry paths",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    /// Returns the base URL the client was built with.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the whole collection, `<base>.json`.
    ///
    /// A base with an empty path addresses the store root, `/.json`.
    pub fn collection_url(&self) -> Url {
        let mut url = self.base_url.clone();
        let trimmed = url.path().trim_end_matches('/').to_string();
        let path = if trimmed.is_empty() { "/" } else { trimmed.as_str() };
        url.set_path(&format!("{}{}", path, REMOTE_RESOURCE_EXTENSION));
        url
    }

    /// URL of a single entry, `<base>/<identifier>.json`.
    ///
    /// The identifier is percent-encoded as one path segment.
    pub fn entry_url(&self, identifier: &str) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Config(format!(
                    "Remote URL '{}' cannot be used as a base for entry paths",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(&format!("{}{}", identifier, REMOTE_RESOURCE_EXTENSION));
        Ok(url)
    }

    /// Uploads an entry, replacing whatever the remote store holds for its identifier.
    ///
    /// # Errors
    ///
    /// - `SyncError::MissingIdentifier` if the entry has no identifier; no request is sent
    /// - `SyncError::Encoding` if the entry cannot be serialized
    /// - `SyncError::Transport` if the remote store is unreachable
    /// - `SyncError::UnexpectedStatus` if the remote store rejects the request
    pub async fn push(&self, entry: &Entry) -> AppResult<()> {
        let identifier = entry
            .sync_identifier()
            .ok_or(SyncError::MissingIdentifier)?;

        let body =
            serde_json::to_vec(&entry.to_representation()).map_err(SyncError::Encoding)?;
        let url = self.entry_url(identifier)?;

        debug!("PUT {} ({} bytes)", url, body.len());
        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(SyncError::Transport)?;

        ensure_success(response).await?;
        info!("Pushed entry {} to remote store", identifier);
        Ok(())
    }

    /// Deletes an entry's resource from the remote store.
    ///
    /// # Errors
    ///
    /// Same identifier and transport failure modes as [`RemoteClient::push`].
    pub async fn remove(&self, entry: &Entry) -> AppResult<()> {
        let identifier = entry
            .sync_identifier()
            .ok_or(SyncError::MissingIdentifier)?;
        let url = self.entry_url(identifier)?;

        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(SyncError::Transport)?;

        ensure_success(response).await?;
        info!("Removed entry {} from remote store", identifier);
        Ok(())
    }

    /// Reads the whole remote collection.
    ///
    /// A `null` collection is treated as empty and `null` members are skipped.
    ///
    /// # Errors
    ///
    /// - `SyncError::Transport` if the remote store is unreachable
    /// - `SyncError::NoData` if the response has no body
    /// - `SyncError::Decoding` if the body is not a collection of representations
    /// - `SyncError::UnexpectedStatus` if the remote store rejects the request
    pub async fn fetch_all(&self) -> AppResult<HashMap<String, EntryRepresentation>> {
        let url = self.collection_url();

        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(SyncError::Transport)?;
        let response = ensure_success(response).await?;
        let body = response.bytes().await.map_err(SyncError::Transport)?;

        if body.iter().all(u8::is_ascii_whitespace) {
            warn!("Remote store returned an empty body");
            return Err(SyncError::NoData.into());
        }

        let collection: Option<HashMap<String, Option<EntryRepresentation>>> =
            serde_json::from_slice(&body).map_err(SyncError::Decoding)?;

        let representations: HashMap<String, EntryRepresentation> = collection
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| value.map(|rep| (key, rep)))
            .collect();

        info!(
            "Fetched {} entries from remote store",
            representations.len()
        );
        Ok(representations)
    }
}

/// Turns a non-success HTTP status into `SyncError::UnexpectedStatus`.
async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Remote store responded with HTTP {}", status);
    Err(SyncError::UnexpectedStatus {
        status: status.as_u16(),
        body,
    }
    .into())
}
