use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use lexis_core::Entry;

/// Full word → entry mapping as persisted.
pub type Snapshot = BTreeMap<String, Entry>;

/// Entry store abstraction.
///
/// `add` and `remove` must be linearizable with respect to each other; `get`
/// and `list` must only ever observe the state left by a complete mutation.
pub trait EntryStore: Send + Sync {
    /// Insert a new entry. Fails with `AlreadyExists` if the word is present.
    fn add(&self, entry: Entry) -> Result<(), EntryStoreError>;

    /// Look up an entry by word.
    fn get(&self, word: &str) -> Result<Entry, EntryStoreError>;

    /// Delete an entry by word, returning what was removed.
    fn remove(&self, word: &str) -> Result<Entry, EntryStoreError>;

    /// All entries, ordered by word.
    fn list(&self) -> Result<Vec<Entry>, EntryStoreError>;
}

#[derive(Debug, Error)]
pub enum EntryStoreError {
    #[error("word already exists: {0}")]
    AlreadyExists(String),

    #[error("word does not exist: {0}")]
    NotFound(String),

    #[error("word must not be empty")]
    EmptyWord,

    #[error("store file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode store snapshot: {0}")]
    Encode(String),

    #[error("store lock poisoned")]
    LockPoisoned,
}

impl EntryStoreError {
    /// True for failures of the backing storage rather than of the request.
    pub fn is_persistence_fault(&self) -> bool {
        matches!(
            self,
            Self::Corrupt { .. } | Self::Io(_) | Self::Encode(_) | Self::LockPoisoned
        )
    }
}
