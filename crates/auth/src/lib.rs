//! `lexis-auth` — bearer token issuance and validation.
//!
//! This crate is intentionally decoupled from HTTP and storage: validation is
//! a pure function of the presented token, the current time and the shared
//! signing secret.

pub mod claims;
pub mod token;

pub use claims::{AUTHORIZED_CALLER, TOKEN_TTL_HOURS, TokenClaims, validate_claims};
pub use token::{Hs256TokenService, TokenError, TokenIssuer, TokenValidator};
