use axum::{
    Router,
    routing::{get, post},
};

pub mod common;
pub mod entries;
pub mod login;
pub mod system;

/// Router for all authenticated endpoints.
///
/// Unknown paths fall back to a 404 that is itself behind authentication, so
/// an unauthenticated caller learns nothing about which routes exist.
pub fn router() -> Router {
    Router::new()
        .route("/entry", post(entries::add_entry))
        .route(
            "/entry/:word",
            get(entries::get_entry).delete(entries::delete_entry),
        )
        .route("/allEntries", get(entries::list_entries))
        .route("/protected-route", get(system::protected_route))
        .fallback(system::not_found)
}
