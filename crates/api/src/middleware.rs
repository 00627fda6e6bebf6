use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use lexis_auth::{TokenError, TokenValidator};
use lexis_infra::{RequestLogRecord, RequestLogSink};

use crate::app::errors;
use crate::context::CallerContext;

// -------------------------
// Authentication
// -------------------------

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenValidator>,
}

/// Why a request was refused. Every variant answers 401 with the same body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("authorization header is not a bearer token")]
    MalformedHeader,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized access")
    }
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let claims = extract_bearer(req.headers())
        .and_then(|token| {
            state
                .tokens
                .validate(token, Utc::now())
                .map_err(AuthRejection::from)
        })
        .inspect_err(|e| tracing::debug!(reason = %e, "rejected request"))?;

    req.extensions_mut().insert(CallerContext::new(claims));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthRejection> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthRejection::MissingHeader)?;

    let header = header
        .to_str()
        .map_err(|_| AuthRejection::MalformedHeader)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(AuthRejection::MalformedHeader)?;

    let token = header.trim();
    if token.is_empty() || token.contains(' ') {
        return Err(AuthRejection::MalformedHeader);
    }

    Ok(token)
}

// -------------------------
// Request logging
// -------------------------

#[derive(Clone)]
pub struct RequestLogState {
    pub sink: Arc<dyn RequestLogSink>,
    /// Largest body buffered for logging; larger bodies are refused with 413.
    pub max_body_bytes: usize,
}

impl RequestLogState {
    /// Append a record; failures are reported, never propagated.
    fn append(&self, record: RequestLogRecord) {
        if let Err(e) = self.sink.append(&record) {
            tracing::warn!(error = %e, "failed to append request log record");
        }
    }
}

/// Methods whose payload is recorded alongside the request line.
fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Record method, target, final status and (for writes) the body of every request.
///
/// The body is drained into memory for the log and handed on unchanged, so
/// downstream extractors read exactly what the client sent.
pub async fn request_logging_middleware(
    State(state): State<RequestLogState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let span = tracing::info_span!(
        "request",
        request_id = %Uuid::now_v7(),
        method = %method,
        path = %target,
    );

    async move {
        let (req, body) = if carries_body(&method) {
            match buffer_body(req, state.max_body_bytes).await {
                Ok((req, body)) => (req, Some(body)),
                Err(response) => {
                    report_status(response.status());
                    state.append(RequestLogRecord::new(
                        method.as_str(),
                        target,
                        response.status().as_u16(),
                        None,
                    ));
                    return response;
                }
            }
        } else {
            (req, None)
        };

        let response = next.run(req).await;
        let status = response.status();
        report_status(status);

        state.append(RequestLogRecord::new(
            method.as_str(),
            target,
            status.as_u16(),
            body,
        ));
        response
    }
    .instrument(span)
    .await
}

async fn buffer_body(req: Request, limit: usize) -> Result<(Request, String), Response> {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
        tracing::warn!(error = %e, "request body could not be buffered");
        errors::json_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            format!("request body must be at most {limit} bytes"),
        )
    })?;

    let text = String::from_utf8_lossy(&bytes).into_owned();
    Ok((Request::from_parts(parts, Body::from(bytes)), text))
}

fn report_status(status: StatusCode) {
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), "request failed");
    } else if status.is_client_error() {
        tracing::warn!(status = status.as_u16(), "request rejected");
    } else {
        tracing::info!(status = status.as_u16(), "request completed");
    }
}
