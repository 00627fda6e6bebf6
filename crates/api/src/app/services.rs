//! Service wiring for the HTTP layer.

use std::sync::Arc;

use lexis_auth::{Hs256TokenService, TokenIssuer, TokenValidator};
use lexis_infra::{EntryStore, FileEntryStore, FileRequestLog, RequestLogSink, ServiceConfig};

const DEFAULT_MAX_LOGGED_BODY_BYTES: usize = 64 * 1024;

/// Everything the handlers and middleware depend on.
///
/// Built once at startup and shared behind an `Arc`; every component is
/// injected so tests can swap stores, secrets and log destinations.
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn EntryStore>,
    pub issuer: Arc<dyn TokenIssuer>,
    pub validator: Arc<dyn TokenValidator>,
    pub request_log: Arc<dyn RequestLogSink>,
    pub max_logged_body_bytes: usize,
}

impl AppServices {
    /// Wire services using one token service as both issuer and validator.
    pub fn new(
        store: Arc<dyn EntryStore>,
        tokens: Arc<Hs256TokenService>,
        request_log: Arc<dyn RequestLogSink>,
    ) -> Self {
        Self {
            store,
            issuer: tokens.clone(),
            validator: tokens,
            request_log,
            max_logged_body_bytes: DEFAULT_MAX_LOGGED_BODY_BYTES,
        }
    }

    pub fn with_max_logged_body_bytes(mut self, max: usize) -> Self {
        self.max_logged_body_bytes = max;
        self
    }

    /// Production wiring: file-backed store and request log.
    pub fn from_config(config: &ServiceConfig) -> Self {
        tracing::info!(
            store = %config.store_path.display(),
            request_log = %config.request_log_path.display(),
            "wiring services"
        );

        Self::new(
            Arc::new(FileEntryStore::new(&config.store_path)),
            Arc::new(Hs256TokenService::new(config.jwt_secret.as_bytes())),
            Arc::new(FileRequestLog::new(&config.request_log_path)),
        )
        .with_max_logged_body_bytes(config.max_logged_body_bytes)
    }
}
