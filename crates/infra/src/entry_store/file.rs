//! File-backed entry store.
//!
//! The whole mapping lives in one JSON document:
//!
//! ```text
//! {
//!   "rust": { "word": "rust", "definition": "a systems language" },
//!   ...
//! }
//! ```
//!
//! Nothing is cached between operations. Reads load the file; mutations load,
//! apply and write the full snapshot back while holding the write lock.
//! Snapshots are written with the write-then-rename pattern so the store file
//! is always either the old or the new complete document.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use lexis_core::Entry;

use super::r#trait::{EntryStore, EntryStoreError, Snapshot};

#[derive(Debug)]
pub struct FileEntryStore {
    path: PathBuf,
    /// Guards the read-modify-write cycle: mutations hold it exclusively.
    lock: RwLock<()>,
}

impl FileEntryStore {
    /// Open a store backed by `path`. The file is created on first mutation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, reason: impl Into<String>) -> EntryStoreError {
        EntryStoreError::Corrupt {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    /// Missing or blank files are an empty store, not an error.
    fn load(&self) -> Result<Snapshot, EntryStoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Snapshot::new()),
            Err(e) => return Err(e.into()),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Snapshot::new());
        }

        let snapshot: Snapshot =
            serde_json::from_slice(&data).map_err(|e| self.corrupt(e.to_string()))?;

        if let Some((key, entry)) = snapshot.iter().find(|(key, entry)| **key != entry.word) {
            return Err(self.corrupt(format!(
                "key '{key}' holds the entry for '{}'",
                entry.word
            )));
        }

        Ok(snapshot)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "entries".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// Replace the store file with `snapshot`.
    ///
    /// 1. Write to a sibling temporary file and fsync it
    /// 2. Rename it over the store file
    /// 3. Fsync the directory so the rename is durable
    fn persist(&self, snapshot: &Snapshot) -> Result<(), EntryStoreError> {
        let data = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| EntryStoreError::Encode(e.to_string()))?;

        fs::create_dir_all(self.parent_dir())?;

        let temp_path = self.temp_path();
        if let Err(e) = write_synced(&temp_path, &data) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        fs::rename(&temp_path, &self.path)?;
        self.sync_directory()?;
        Ok(())
    }

    #[cfg(unix)]
    fn sync_directory(&self) -> Result<(), EntryStoreError> {
        File::open(self.parent_dir())?.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> Result<(), EntryStoreError> {
        Ok(())
    }

    fn read<T>(
        &self,
        f: impl FnOnce(Snapshot) -> Result<T, EntryStoreError>,
    ) -> Result<T, EntryStoreError> {
        let _guard = self.lock.read().map_err(|_| EntryStoreError::LockPoisoned)?;
        f(self.load()?)
    }

    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Snapshot) -> Result<T, EntryStoreError>,
    ) -> Result<T, EntryStoreError> {
        let _guard = self
            .lock
            .write()
            .map_err(|_| EntryStoreError::LockPoisoned)?;

        let mut snapshot = self.load()?;
        let out = f(&mut snapshot)?;
        self.persist(&snapshot)?;
        Ok(out)
    }
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

impl EntryStore for FileEntryStore {
    fn add(&self, entry: Entry) -> Result<(), EntryStoreError> {
        if entry.word.is_empty() {
            return Err(EntryStoreError::EmptyWord);
        }

        self.mutate(|snapshot| {
            if snapshot.contains_key(&entry.word) {
                return Err(EntryStoreError::AlreadyExists(entry.word));
            }
            tracing::debug!(word = %entry.word, "adding entry");
            snapshot.insert(entry.word.clone(), entry);
            Ok(())
        })
    }

    fn get(&self, word: &str) -> Result<Entry, EntryStoreError> {
        self.read(|mut snapshot| {
            snapshot
                .remove(word)
                .ok_or_else(|| EntryStoreError::NotFound(word.to_string()))
        })
    }

    fn remove(&self, word: &str) -> Result<Entry, EntryStoreError> {
        self.mutate(|snapshot| {
            let removed = snapshot
                .remove(word)
                .ok_or_else(|| EntryStoreError::NotFound(word.to_string()))?;
            tracing::debug!(word, "removed entry");
            Ok(removed)
        })
    }

    fn list(&self) -> Result<Vec<Entry>, EntryStoreError> {
        self.read(|snapshot| Ok(snapshot.into_values().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn store_in(dir: &tempfile::TempDir) -> FileEntryStore {
        FileEntryStore::new(dir.path().join("dictionary.json"))
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.list().unwrap().is_empty());
        assert!(matches!(store.get("hello"), Err(EntryStoreError::NotFound(_))));
        // Reads never create the file.
        assert!(!store.path().exists());
    }

    #[test]
    fn blank_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "  \n").unwrap();

        assert!(store.list().unwrap().is_empty());
        store.add(Entry::new("hello", "hello there")).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn entries_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir)
            .add(Entry::new("hello", "hello there"))
            .unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("hello").unwrap().definition, "hello there");
    }

    #[test]
    fn file_layout_maps_word_to_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.add(Entry::new("hello", "hello there")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({ "hello": { "word": "hello", "definition": "hello there" } })
        );
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn add_get_conflict_remove_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.add(Entry::new("go", "a programming language")).unwrap();
        assert_eq!(
            store.get("go").unwrap(),
            Entry::new("go", "a programming language")
        );
        assert!(matches!(
            store.add(Entry::new("go", "anything")),
            Err(EntryStoreError::AlreadyExists(_))
        ));
        store.remove("go").unwrap();
        assert!(matches!(store.get("go"), Err(EntryStoreError::NotFound(_))));
        assert!(matches!(store.remove("go"), Err(EntryStoreError::NotFound(_))));
    }

    #[test]
    fn corrupt_file_is_reported_and_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json").unwrap();

        let err = store.add(Entry::new("hello", "hello there")).unwrap_err();
        assert!(matches!(err, EntryStoreError::Corrupt { .. }));
        assert!(err.is_persistence_fault());
        assert!(matches!(store.list(), Err(EntryStoreError::Corrupt { .. })));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{not json");
    }

    #[test]
    fn mismatched_key_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"hello": {"word": "world", "definition": "mismatch"}}"#,
        )
        .unwrap();

        assert!(matches!(store.get("hello"), Err(EntryStoreError::Corrupt { .. })));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileEntryStore::new(dir.path().join("nested/data/dictionary.json"));

        store.add(Entry::new("hello", "hello there")).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn concurrent_adds_of_distinct_words_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .add(Entry::new(format!("word-{i:02}"), format!("definition {i}")))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 32);
        // A fresh handle sees the same state, so nothing was lost on disk.
        assert_eq!(store_in(&dir).list().unwrap(), entries);
    }

    #[test]
    fn concurrent_adds_of_the_same_word_admit_exactly_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.add(Entry::new("shared", format!("definition {i}"))))
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn concurrent_removes_and_adds_do_not_lose_updates() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));
        for i in 0..16 {
            store
                .add(Entry::new(format!("old-{i:02}"), "to be removed"))
                .unwrap();
        }

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.remove(&format!("old-{i:02}")).unwrap();
                    store
                        .add(Entry::new(format!("new-{i:02}"), "freshly added"))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 16);
        assert!(entries.iter().all(|e| e.word.starts_with("new-")));
    }
}
