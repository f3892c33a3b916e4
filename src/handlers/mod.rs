// HTTP handlers: axum route functions wiring the engine together. Grounded
// on the `pawz-code/server` manifest's choice of `axum` + `tower-http`
// cors as the transport (see `examples/elisplash-paw/pawz-code/server/Cargo.toml`);
// no source was retrieved for that crate, so the actual route wiring here
// is written fresh in ordinary axum style.

pub mod chat;
pub mod health;
pub mod memory;
pub mod models;

use crate::atoms::error::{ApiError, ApiErrorKind};
use crate::atoms::types::{ErrorBody, ErrorEnvelope};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Shared conversion from the engine's `ApiError` taxonomy into the HTTP
/// error envelope every handler returns on failure.
pub fn error_response(err: &ApiError) -> Response {
    let status = StatusCode::from_u16(err.client_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorEnvelope {
        error: ErrorBody {
            message: err.message.clone(),
            error_type: err.type_field().to_string(),
            code: err.client_status(),
        },
    };
    let mut resp = (status, Json(body)).into_response();
    if err.kind == ApiErrorKind::RateLimit {
        if let Some(secs) = err.retry_after {
            if secs > 0 {
                if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                    resp.headers_mut().insert(axum::http::header::RETRY_AFTER, value);
                }
            }
        }
    }
    resp
}
