use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use lexis_core::DomainError;
use lexis_infra::EntryStoreError;

pub fn store_error_to_response(err: EntryStoreError) -> axum::response::Response {
    if err.is_persistence_fault() {
        tracing::error!(error = %err, "entry store failure");
    }

    match err {
        EntryStoreError::AlreadyExists(word) => json_error(
            StatusCode::CONFLICT,
            "conflict",
            format!("word already exists: {word}"),
        ),
        EntryStoreError::NotFound(word) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("word does not exist: {word}"),
        ),
        EntryStoreError::EmptyWord => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", "word must not be empty")
        }
        EntryStoreError::Corrupt { .. }
        | EntryStoreError::Io(_)
        | EntryStoreError::Encode(_)
        | EntryStoreError::LockPoisoned => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            "the dictionary could not be read or written",
        ),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
