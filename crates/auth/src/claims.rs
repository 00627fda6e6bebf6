use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::token::TokenError;

/// Subject carried by every token: the service knows a single principal class.
pub const AUTHORIZED_CALLER: &str = "authorized-caller";

/// Lifetime of an issued token.
pub const TOKEN_TTL_HOURS: i64 = 72;

/// Token claims model (transport-agnostic).
///
/// Timestamps are unix seconds, as registered JWT claims require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject; always [`AUTHORIZED_CALLER`] for tokens minted by this service.
    pub sub: String,

    /// Issued-at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,
}

impl TokenClaims {
    /// Claims for a token issued at `now` and living for `ttl`.
    pub fn issued_at(now: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = now.timestamp();
        Self {
            sub: AUTHORIZED_CALLER.to_string(),
            iat,
            exp: iat + ttl.num_seconds(),
        }
    }
}

/// Deterministically validate the claims' time window against `now`.
///
/// Note: this validates the *claims* only. Signature verification happens in
/// [`crate::token`] before this is called.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if claims.exp <= claims.iat {
        return Err(TokenError::InvalidTimeWindow);
    }
    let now = now.timestamp();
    if now < claims.iat {
        return Err(TokenError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn issued_claims_expire_after_ttl() {
        let claims = TokenClaims::issued_at(t0(), Duration::hours(TOKEN_TTL_HOURS));
        assert_eq!(claims.sub, AUTHORIZED_CALLER);
        assert_eq!(claims.exp - claims.iat, 72 * 3600);
    }

    #[test]
    fn window_is_half_open() {
        let claims = TokenClaims::issued_at(t0(), Duration::hours(1));

        assert_eq!(validate_claims(&claims, t0()), Ok(()));
        assert_eq!(
            validate_claims(&claims, t0() + Duration::minutes(59)),
            Ok(())
        );
        assert_eq!(
            validate_claims(&claims, t0() + Duration::hours(1)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn future_issue_time_is_rejected() {
        let claims = TokenClaims::issued_at(t0(), Duration::hours(1));
        assert_eq!(
            validate_claims(&claims, t0() - Duration::seconds(1)),
            Err(TokenError::NotYetValid)
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let claims = TokenClaims {
            sub: AUTHORIZED_CALLER.to_string(),
            iat: 100,
            exp: 100,
        };
        assert_eq!(
            validate_claims(&claims, t0()),
            Err(TokenError::InvalidTimeWindow)
        );
    }
}
