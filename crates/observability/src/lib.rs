//! Operational telemetry (shared setup).
//!
//! Distinct from the request log: this is where the service reports its own
//! behaviour, including failures of the request log itself.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;
