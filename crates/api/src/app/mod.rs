//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store, token service and request log construction
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::post};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Layering, outermost first: request logging → shared services →
/// authentication (everything but `/login`) → handler.
pub fn build_app(services: AppServices) -> Router {
    let auth_state = middleware::AuthState {
        tokens: services.validator.clone(),
    };
    let log_state = middleware::RequestLogState {
        sink: services.request_log.clone(),
        max_body_bytes: services.max_logged_body_bytes,
    };

    // Protected routes (and the fallback) require a valid bearer token.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/login", post(routes::login::login))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    log_state,
                    middleware::request_logging_middleware,
                ))
                .layer(Extension(Arc::new(services))),
        )
}
