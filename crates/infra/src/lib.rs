//! Infrastructure layer: durable entry storage, request log sinks, config.

pub mod config;
pub mod entry_store;
pub mod request_log;

pub use config::{ConfigError, ServiceConfig};
pub use entry_store::{EntryStore, EntryStoreError, FileEntryStore, InMemoryEntryStore};
pub use request_log::{
    FileRequestLog, InMemoryRequestLog, RequestLogError, RequestLogRecord, RequestLogSink,
};
