use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub word: String,
    pub definition: String,
}
