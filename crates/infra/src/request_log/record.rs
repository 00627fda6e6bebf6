use chrono::{DateTime, Utc};

/// Timestamp layout of a log line, e.g. `19-10-2026 14:03:07`.
const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// One observed request/response pair.
///
/// Renders as `[timestamp] METHOD PATH STATUS [body]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLogRecord {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub status: u16,
    /// Request payload, present for body-carrying methods only.
    pub body: Option<String>,
}

impl RequestLogRecord {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        status: u16,
        body: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            method: method.into(),
            path: path.into(),
            status,
            body,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl core::fmt::Display for RequestLogRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "[{}] {} {} {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.method,
            self.path,
            self.status
        )?;
        if let Some(body) = &self.body {
            // A record must stay on one line.
            let body = body.replace('\r', "\\r").replace('\n', "\\n");
            write!(f, " {body}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn renders_without_body() {
        let record = RequestLogRecord::new("GET", "/entry/rust", 200, None).with_timestamp(ts());
        assert_eq!(record.to_string(), "[02-01-2024 03:04:05] GET /entry/rust 200");
    }

    #[test]
    fn renders_body_for_writes() {
        let record = RequestLogRecord::new(
            "POST",
            "/entry",
            201,
            Some(r#"{"word":"rust"}"#.to_string()),
        )
        .with_timestamp(ts());
        assert_eq!(
            record.to_string(),
            r#"[02-01-2024 03:04:05] POST /entry 201 {"word":"rust"}"#
        );
    }

    #[test]
    fn escapes_line_breaks_in_body() {
        let record = RequestLogRecord::new("POST", "/entry", 400, Some("a\nb\r\n".to_string()))
            .with_timestamp(ts());
        let line = record.to_string();
        assert!(!line.contains('\n'));
        assert!(line.ends_with(r"a\nb\r\n"));
    }
}
