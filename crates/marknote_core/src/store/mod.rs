//! Persistent store adapter for the note list.
//!
//! # Responsibility
//! - Define the synchronous key-value backend contract (`KeyValueBackend`).
//! - Serialize/deserialize the whole note list under one key (`NoteStore`).
//!
//! # Invariants
//! - The adapter never retains a copy of the note list between calls.
//! - `load` fails soft: missing, unreadable or foreign data yields an empty list.
//! - `load` never returns two notes sharing an id; later duplicates get fresh ids.
//! - `save` writes the full list in one backend call, never partially.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod local;
mod memory;
pub mod schema;
mod sqlite;

pub use local::{LocalNoteStore, NoteStore, NOTES_KEY};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure surfaced to callers as a persistence error.
#[derive(Debug)]
pub enum StoreError {
    /// Backend refused the write because it would exceed its capacity.
    QuotaExceeded { requested: usize, limit: usize },
    /// Backend is not usable (closed, missing table, disabled).
    Unavailable(String),
    /// SQLite transport failure.
    Sqlite(rusqlite::Error),
    /// Store file was written by a newer schema than this binary knows.
    UnsupportedSchemaVersion { found: u32, latest_supported: u32 },
    /// Note list could not be encoded.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded { requested, limit } => write!(
                f,
                "store quota exceeded: write needs {requested} bytes, limit is {limit}"
            ),
            Self::Unavailable(details) => write!(f, "store unavailable: {details}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "store schema version {found} is newer than supported {latest_supported}"
            ),
            Self::Serialize(err) => write!(f, "failed to serialize notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::QuotaExceeded { .. }
            | Self::Unavailable(_)
            | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Synchronous string key-value storage.
///
/// Calls are atomic and never yield; a failed `set_item` leaves the previous
/// value in place.
pub trait KeyValueBackend {
    /// Returns the stored value for `key`, if any.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> StoreResult<()>;
}
