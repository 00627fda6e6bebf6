//! Word → definition store boundary.
//!
//! Every mutation is a full read-modify-write cycle over the stored snapshot.
//! Implementations must serialize mutations so concurrent callers never lose
//! each other's updates.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileEntryStore;
pub use in_memory::InMemoryEntryStore;
pub use r#trait::{EntryStore, EntryStoreError, Snapshot};
