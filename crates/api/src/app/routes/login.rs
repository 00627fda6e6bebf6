use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::app::errors;
use crate::app::services::AppServices;

/// Issue a bearer token to any caller; no credentials are checked.
pub async fn login(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.issuer.issue(Utc::now()) {
        Ok(token) => (StatusCode::OK, token).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to issue token");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_error",
                "error generating token",
            )
        }
    }
}
