use axum::http::StatusCode;
use axum::response::Response;

use crate::app::errors;

/// Run blocking store I/O off the async executor.
pub async fn run_blocking<T, F>(f: F) -> Result<T, Response>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!(error = %e, "blocking store task failed");
        errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "store task failed",
        )
    })
}
