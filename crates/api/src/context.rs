use lexis_auth::TokenClaims;

/// Caller context for an authenticated request.
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    claims: TokenClaims,
}

impl CallerContext {
    pub fn new(claims: TokenClaims) -> Self {
        Self { claims }
    }

    pub fn subject(&self) -> &str {
        &self.claims.sub
    }

    /// Unix timestamp at which the presented token stops being accepted.
    pub fn expires_at(&self) -> i64 {
        self.claims.exp
    }
}
