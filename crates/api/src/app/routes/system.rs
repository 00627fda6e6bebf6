use axum::{extract::Extension, http::StatusCode, response::Response};

use crate::app::errors;
use crate::context::CallerContext;

pub const PROTECTED_ROUTE_MESSAGE: &str = "You have access to the protected route";

pub async fn protected_route(Extension(caller): Extension<CallerContext>) -> &'static str {
    tracing::debug!(
        subject = caller.subject(),
        expires_at = caller.expires_at(),
        "protected route accessed"
    );
    PROTECTED_ROUTE_MESSAGE
}

pub async fn not_found() -> Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "no such route")
}
