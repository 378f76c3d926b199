//! Journal entry types.
//!
//! An [`Entry`] is the locally persisted record. An [`EntryRepresentation`] is
//! its wire form on the remote store, keyed there by identifier. Converting
//! between the two is a plain field copy.

pub mod timestamp;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The mood recorded with an entry.
///
/// Moods are persisted and transmitted as their raw lowercase string, so a
/// raw value written by another client survives a round trip even when it is
/// not one of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mood {
    Happy,
    #[default]
    Neutral,
    Sad,
}

impl Mood {
    /// Returns the raw value stored locally and sent to the remote store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Mood::Happy),
            "neutral" => Ok(Mood::Neutral),
            "sad" => Ok(Mood::Sad),
            other => Err(format!("Unknown mood: {}", other)),
        }
    }
}

/// A journal entry as held by the local store.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Row id in the local database. Stable for the lifetime of the record.
    pub local_id: i64,
    /// Sync identity. `None` until the entry has been assigned a remote address.
    pub identifier: Option<String>,
    pub title: String,
    pub body_text: String,
    pub timestamp: DateTime<Utc>,
    /// Raw mood value, see [`Mood`].
    pub mood: String,
}

impl Entry {
    /// Returns the identifier if the entry can be addressed on the remote store.
    ///
    /// An empty identifier counts as missing.
    pub fn sync_identifier(&self) -> Option<&str> {
        self.identifier.as_deref().filter(|id| !id.is_empty())
    }

    /// Parses the raw mood value, returning `None` for values this client does not know.
    pub fn known_mood(&self) -> Option<Mood> {
        self.mood.parse().ok()
    }

    /// Projects the entry into its wire form.
    pub fn to_representation(&self) -> EntryRepresentation {
        EntryRepresentation {
            title: self.title.clone(),
            body_text: self.body_text.clone(),
            timestamp: self.timestamp,
            identifier: self.identifier.clone(),
            mood: self.mood.clone(),
        }
    }
}

/// Wire form of an entry on the remote store.
///
/// ```
/// use journal_sync::entry::EntryRepresentation;
///
/// let json = r#"{"title":"Hi","bodyText":"there","identifier":"id1","mood":"happy","timestamp":"2024-03-01T09:30:00Z"}"#;
/// let rep: EntryRepresentation = serde_json::from_str(json).unwrap();
/// assert_eq!(rep.sync_identifier(), Some("id1"));
/// assert_eq!(rep.body_text, "there");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRepresentation {
    pub title: String,
    pub body_text: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub mood: String,
}

impl EntryRepresentation {
    /// Returns the identifier when it is present and non-empty.
    pub fn sync_identifier(&self) -> Option<&str> {
        self.identifier.as_deref().filter(|id| !id.is_empty())
    }
}

/// Fields for a new local entry.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub title: String,
    pub body_text: String,
    pub mood: Mood,
    pub identifier: Option<String>,
}

impl EntryDraft {
    /// Creates a draft with no identifier (a local-only entry).
    pub fn new(title: impl Into<String>, body_text: impl Into<String>, mood: Mood) -> Self {
        Self {
            title: title.into(),
            body_text: body_text.into(),
            mood,
            identifier: None,
        }
    }

    /// Sets the sync identifier the entry is created with.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

/// Replacement field values for an existing entry.
///
/// The timestamp defaults to the moment the update is built and the mood
/// defaults to [`Mood::Neutral`].
#[derive(Debug, Clone)]
pub struct EntryUpdate {
    pub title: String,
    pub body_text: String,
    pub timestamp: DateTime<Utc>,
    pub mood: Mood,
}

impl EntryUpdate {
    pub fn new(title: impl Into<String>, body_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body_text: body_text.into(),
            timestamp: Utc::now(),
            mood: Mood::default(),
        }
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn mood(mut self, mood: Mood) -> Self {
        self.mood = mood;
        self
    }
}
