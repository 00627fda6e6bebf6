//! HS256 bearer tokens.
//!
//! Signature and structure are checked by `jsonwebtoken`; the time window is
//! checked by [`validate_claims`] against a caller-supplied clock so the
//! outcome never depends on the wall clock of the validating process.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::claims::{TOKEN_TTL_HOURS, TokenClaims, validate_claims};

/// Reasons a token could not be issued or accepted.
///
/// Callers at the HTTP boundary collapse every variant into a single
/// "unauthorized" outcome; the distinction exists for diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not verify")]
    BadSignature,

    #[error("token uses an unexpected signing algorithm")]
    WrongAlgorithm,

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,

    #[error("no signing secret configured")]
    MissingSecret,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => Self::BadSignature,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::InvalidKeyFormat => Self::WrongAlgorithm,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::NotYetValid,
            _ => Self::Malformed,
        }
    }
}

/// Mints tokens for the login endpoint.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, now: DateTime<Utc>) -> Result<String, TokenError>;
}

/// Verifies presented bearer tokens.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError>;
}

/// HMAC-signed token service sharing one secret between issuer and validator.
#[derive(Clone)]
pub struct Hs256TokenService {
    secret: Vec<u8>,
    ttl: Duration,
}

impl Hs256TokenService {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Any HMAC variant signed with the shared secret is acceptable.
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // Expiry is checked by `validate_claims` against the injected clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl core::fmt::Debug for Hs256TokenService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256TokenService")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenIssuer for Hs256TokenService {
    fn issue(&self, now: DateTime<Utc>) -> Result<String, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let claims = TokenClaims::issued_at(now, self.ttl);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))?;

        tracing::debug!(exp = claims.exp, "issued token");
        Ok(token)
    }
}

impl TokenValidator for Hs256TokenService {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let decoded = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Self::validation(),
        )?;

        validate_claims(&decoded.claims, now)?;
        Ok(decoded.claims)
    }
}
