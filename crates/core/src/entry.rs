//! Dictionary entry value type.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Minimum number of characters in a word accepted at the API boundary.
pub const MIN_WORD_LEN: usize = 3;

/// Minimum number of characters in a definition accepted at the API boundary.
pub const MIN_DEFINITION_LEN: usize = 5;

/// One word/definition record.
///
/// The word is the unique key of the store; the definition is free text and
/// never changes once stored (there is no update operation, only add/remove).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub word: String,
    pub definition: String,
}

impl Entry {
    /// Build an entry without boundary validation.
    ///
    /// Stores only require a non-empty word; length rules are enforced by
    /// [`Entry::validated`] where requests enter the system.
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
        }
    }

    /// Build an entry from untrusted input.
    ///
    /// Both fields are trimmed; lengths are counted in characters, not bytes.
    pub fn validated(word: &str, definition: &str) -> DomainResult<Self> {
        let word = word.trim();
        let definition = definition.trim();

        if word.chars().count() < MIN_WORD_LEN {
            return Err(DomainError::validation(format!(
                "word must be at least {MIN_WORD_LEN} characters"
            )));
        }
        if definition.chars().count() < MIN_DEFINITION_LEN {
            return Err(DomainError::validation(format!(
                "definition must be at least {MIN_DEFINITION_LEN} characters"
            )));
        }

        Ok(Self::new(word, definition))
    }
}
