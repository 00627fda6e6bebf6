use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{RequestLogError, RequestLogRecord, RequestLogSink};

/// Append-only plain-text request log.
///
/// The file is opened lazily and kept open. A failed open or write drops the
/// handle so the next append retries from scratch; the caller decides how to
/// report the failure.
#[derive(Debug)]
pub struct FileRequestLog {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileRequestLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File, RequestLogError> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| RequestLogError::Open {
                path: self.path.clone(),
                source,
            })
    }
}

impl RequestLogSink for FileRequestLog {
    fn append(&self, record: &RequestLogRecord) -> Result<(), RequestLogError> {
        let mut line = record.to_string();
        line.push('\n');

        let mut slot = self
            .file
            .lock()
            .map_err(|_| RequestLogError::LockPoisoned)?;

        let file = match slot.as_mut() {
            Some(file) => file,
            None => slot.insert(self.open()?),
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            *slot = None;
            return Err(e.into());
        }
        Ok(())
    }
}
