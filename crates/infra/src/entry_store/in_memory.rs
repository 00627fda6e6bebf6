use std::sync::RwLock;

use lexis_core::Entry;

use super::r#trait::{EntryStore, EntryStoreError, Snapshot};

/// In-memory entry store.
///
/// Intended for tests/dev. Same semantics as [`super::FileEntryStore`]
/// without durability.
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    entries: RwLock<Snapshot>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for InMemoryEntryStore {
    fn add(&self, entry: Entry) -> Result<(), EntryStoreError> {
        if entry.word.is_empty() {
            return Err(EntryStoreError::EmptyWord);
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|_| EntryStoreError::LockPoisoned)?;

        if entries.contains_key(&entry.word) {
            return Err(EntryStoreError::AlreadyExists(entry.word));
        }
        entries.insert(entry.word.clone(), entry);
        Ok(())
    }

    fn get(&self, word: &str) -> Result<Entry, EntryStoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| EntryStoreError::LockPoisoned)?;

        entries
            .get(word)
            .cloned()
            .ok_or_else(|| EntryStoreError::NotFound(word.to_string()))
    }

    fn remove(&self, word: &str) -> Result<Entry, EntryStoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| EntryStoreError::LockPoisoned)?;

        entries
            .remove(word)
            .ok_or_else(|| EntryStoreError::NotFound(word.to_string()))
    }

    fn list(&self) -> Result<Vec<Entry>, EntryStoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| EntryStoreError::LockPoisoned)?;

        Ok(entries.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_get_round_trips() {
        let store = InMemoryEntryStore::new();
        store.add(Entry::new("hello", "hello there")).unwrap();

        assert_eq!(store.get("hello").unwrap().definition, "hello there");
        assert!(matches!(
            store.get("world"),
            Err(EntryStoreError::NotFound(w)) if w == "world"
        ));
    }

    #[test]
    fn duplicate_add_is_rejected_regardless_of_definition() {
        let store = InMemoryEntryStore::new();
        store.add(Entry::new("hello", "hello there")).unwrap();

        assert!(matches!(
            store.add(Entry::new("hello", "something else entirely")),
            Err(EntryStoreError::AlreadyExists(_))
        ));
        assert_eq!(store.get("hello").unwrap().definition, "hello there");
    }

    #[test]
    fn remove_leaves_tombstone() {
        let store = InMemoryEntryStore::new();
        store.add(Entry::new("hello", "hello there")).unwrap();

        let removed = store.remove("hello").unwrap();
        assert_eq!(removed.word, "hello");
        assert!(matches!(store.get("hello"), Err(EntryStoreError::NotFound(_))));
        assert!(matches!(store.remove("hello"), Err(EntryStoreError::NotFound(_))));
    }

    #[test]
    fn list_is_sorted_by_word() {
        let store = InMemoryEntryStore::new();
        store.add(Entry::new("zebra", "striped animal")).unwrap();
        store.add(Entry::new("apple", "a fruit")).unwrap();

        let words: Vec<_> = store.list().unwrap().into_iter().map(|e| e.word).collect();
        assert_eq!(words, vec!["apple", "zebra"]);
    }

    #[test]
    fn empty_word_is_rejected() {
        let store = InMemoryEntryStore::new();
        assert!(matches!(
            store.add(Entry::new("", "nothing")),
            Err(EntryStoreError::EmptyWord)
        ));
    }
}
