use std::sync::Mutex;

use super::{RequestLogError, RequestLogRecord, RequestLogSink};

/// Request log kept in memory (tests/dev).
#[derive(Debug, Default)]
pub struct InMemoryRequestLog {
    records: Mutex<Vec<RequestLogRecord>>,
}

impl InMemoryRequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far, in append order.
    pub fn records(&self) -> Vec<RequestLogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl RequestLogSink for InMemoryRequestLog {
    fn append(&self, record: &RequestLogRecord) -> Result<(), RequestLogError> {
        self.records
            .lock()
            .map_err(|_| RequestLogError::LockPoisoned)?
            .push(record.clone());
        Ok(())
    }
}
