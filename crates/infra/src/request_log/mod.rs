//! Append-only request log.
//!
//! One line per request. Sinks own their destination exclusively and
//! serialize appends so concurrent requests never interleave lines.

pub mod file;
pub mod in_memory;
pub mod record;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileRequestLog;
pub use in_memory::InMemoryRequestLog;
pub use record::RequestLogRecord;

/// Destination for request log records.
pub trait RequestLogSink: Send + Sync {
    fn append(&self, record: &RequestLogRecord) -> Result<(), RequestLogError>;
}

#[derive(Debug, Error)]
pub enum RequestLogError {
    #[error("failed to open request log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write request log: {0}")]
    Write(#[from] std::io::Error),

    #[error("request log lock poisoned")]
    LockPoisoned,
}
