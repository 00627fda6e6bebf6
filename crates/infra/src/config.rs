//! Configuration loading and representation.
//!
//! All settings come from environment variables; every one has a default so
//! a bare `lexis-api` starts a working dev server.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const ENV_BIND_ADDR: &str = "LEXIS_BIND_ADDR";
pub const ENV_JWT_SECRET: &str = "JWT_SECRET";
pub const ENV_STORE_PATH: &str = "LEXIS_STORE_PATH";
pub const ENV_REQUEST_LOG_PATH: &str = "LEXIS_REQUEST_LOG_PATH";
pub const ENV_MAX_LOGGED_BODY_BYTES: &str = "LEXIS_MAX_LOGGED_BODY_BYTES";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_JWT_SECRET: &str = "dev-secret";
const DEFAULT_STORE_PATH: &str = "dictionary.json";
const DEFAULT_REQUEST_LOG_PATH: &str = "requests.log";
const DEFAULT_MAX_LOGGED_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process-wide service settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    /// Shared secret used to sign and verify bearer tokens.
    pub jwt_secret: String,
    /// JSON file holding the dictionary.
    pub store_path: PathBuf,
    /// Append-only request log.
    pub request_log_path: PathBuf,
    /// Upper bound on a request body buffered for logging.
    pub max_logged_body_bytes: usize,
}

impl ServiceConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables (injectable for tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = parse(
            ENV_BIND_ADDR,
            lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let jwt_secret = match lookup(ENV_JWT_SECRET) {
            Some(secret) if !secret.is_empty() => secret,
            Some(_) => {
                return Err(ConfigError::InvalidValue {
                    key: ENV_JWT_SECRET,
                    value: String::new(),
                    reason: "must not be empty".to_string(),
                });
            }
            None => {
                tracing::warn!("{ENV_JWT_SECRET} not set; using insecure dev default");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let store_path = lookup(ENV_STORE_PATH)
            .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string())
            .into();
        let request_log_path = lookup(ENV_REQUEST_LOG_PATH)
            .unwrap_or_else(|| DEFAULT_REQUEST_LOG_PATH.to_string())
            .into();

        let max_logged_body_bytes = match lookup(ENV_MAX_LOGGED_BODY_BYTES) {
            Some(raw) => parse(ENV_MAX_LOGGED_BODY_BYTES, raw)?,
            None => DEFAULT_MAX_LOGGED_BODY_BYTES,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            store_path,
            request_log_path,
            max_logged_body_bytes,
        })
    }
}

impl core::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("store_path", &self.store_path)
            .field("request_log_path", &self.request_log_path)
            .field("max_logged_body_bytes", &self.max_logged_body_bytes)
            .finish()
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
