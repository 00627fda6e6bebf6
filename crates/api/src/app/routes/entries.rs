use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use lexis_core::Entry;

use crate::app::routes::common::run_blocking;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn add_entry(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::AddEntryRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_body",
                rejection.body_text(),
            );
        }
    };

    let entry = match Entry::validated(&body.word, &body.definition) {
        Ok(entry) => entry,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let store = services.store.clone();
    match run_blocking(move || store.add(entry)).await {
        Ok(Ok(())) => StatusCode::CREATED.into_response(),
        Ok(Err(e)) => errors::store_error_to_response(e),
        Err(response) => response,
    }
}

pub async fn get_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Path(word): Path<String>,
) -> Response {
    let store = services.store.clone();
    match run_blocking(move || store.get(&word)).await {
        Ok(Ok(entry)) => Json(entry).into_response(),
        Ok(Err(e)) => errors::store_error_to_response(e),
        Err(response) => response,
    }
}

pub async fn delete_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Path(word): Path<String>,
) -> Response {
    let store = services.store.clone();
    match run_blocking(move || store.remove(&word)).await {
        Ok(Ok(_removed)) => StatusCode::OK.into_response(),
        Ok(Err(e)) => errors::store_error_to_response(e),
        Err(response) => response,
    }
}

pub async fn list_entries(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let store = services.store.clone();
    match run_blocking(move || store.list()).await {
        Ok(Ok(entries)) => Json(entries).into_response(),
        Ok(Err(e)) => errors::store_error_to_response(e),
        Err(response) => response,
    }
}
