// ── Error Classifier ───────────────────────────────────────────────────────
// Maps an opaque upstream failure into the closed `ApiError` taxonomy.
// Generalizes the duplicated 401/403/429/5xx branches that the teacher
// codebase repeats in both `AnthropicProvider::chat_stream_inner` and
// `OpenAiProvider::chat_stream` into a single function every provider and
// the circuit breaker share — classification happens exactly once per
// failure, never re-derived downstream.

use crate::atoms::error::{ApiError, ApiErrorKind};

/// Classify a transport-level (pre-HTTP-response) failure, e.g. a
/// `reqwest::Error` from a connection that never completed.
pub fn classify_transport_error(err: &reqwest::Error) -> ApiError {
    let text = err.to_string().to_lowercase();
    if text.contains("timeout") || text.contains("deadline exceeded") || err.is_timeout() {
        ApiError::new(ApiErrorKind::Timeout, err.to_string())
    } else {
        ApiError::new(ApiErrorKind::Unexpected, err.to_string())
    }
}

/// Classify a completed HTTP response by status code. `retry_after` is the
/// parsed `Retry-After` header value in seconds, if present and numeric.
pub fn classify_http_status(status: u16, body: &str, retry_after: Option<u64>) -> ApiError {
    let base = match status {
        429 => ApiError::new(ApiErrorKind::RateLimit, body),
        401 | 403 => ApiError::new(ApiErrorKind::AuthFailed, body),
        408 | 504 => ApiError::new(ApiErrorKind::Timeout, body),
        s if s >= 500 => ApiError::new(ApiErrorKind::ServerError, body),
        s if s >= 400 => ApiError::new(ApiErrorKind::ClientError, body),
        _ => ApiError::new(ApiErrorKind::Unexpected, body),
    }
    .with_status(status);

    match (status, retry_after) {
        (429, Some(secs)) => base.with_retry_after(secs),
        _ => base,
    }
}

/// Parse a `Retry-After` header value. Only integer-seconds form is
/// supported; HTTP-date form falls back to the caller's own backoff
/// schedule.
pub fn parse_retry_after(header_value: &str) -> Option<u64> {
    header_value.trim().parse::<u64>().ok()
}
