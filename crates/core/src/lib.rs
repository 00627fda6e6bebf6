//! `lexis-core` — dictionary domain building blocks.
//!
//! This crate contains the **pure domain** types shared by the store and the
//! HTTP boundary (no I/O, no framework types).

pub mod entry;
pub mod error;

pub use entry::{Entry, MIN_DEFINITION_LEN, MIN_WORD_LEN};
pub use error::{DomainError, DomainResult};
