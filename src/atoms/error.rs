// ── Atoms: Error Types ───────────────────────────────────────────────────
// Two error enums by design:
//   • `EngineError` — process/IO-level failures (config load, disk, JSON).
//   • `ApiError` — the client-visible taxonomy, with its own `retryable()`
//     predicate and HTTP status mapping.
// Upstream/classification code never needs to look inside `EngineError`;
// `ApiError` is the only thing that crosses the orchestrator boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError::Other(s)
    }
}

// ── Client-facing API error taxonomy ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    RateLimit,
    AuthFailed,
    Timeout,
    ServerError,
    ClientError,
    /// Malformed request body or parameters that fail validation before
    /// any upstream call is attempted.
    InvalidRequest,
    CircuitOpen,
    Unexpected,
    /// Requested model id/shortcode has no catalogue entry.
    ConfigNotFound,
    ApiKeyMissing,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub http_status: Option<u16>,
    pub message: String,
    pub retry_after: Option<u64>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            http_status: None,
            message: message.into(),
            retry_after: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_retry_after(mut self, secs: u64) -> Self {
        self.retry_after = Some(secs);
        self
    }

    /// Whether the retry engine should attempt this request again. Pure
    /// function of `kind` — auth/client/validation failures never clear up
    /// on their own, so they're excluded.
    pub fn retryable(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::RateLimit | ApiErrorKind::Timeout | ApiErrorKind::ServerError
        )
    }

    /// HTTP status to surface to the gateway's own client.
    pub fn client_status(&self) -> u16 {
        match self.kind {
            ApiErrorKind::RateLimit => 429,
            ApiErrorKind::AuthFailed => 401,
            ApiErrorKind::Timeout => 504,
            ApiErrorKind::ServerError => 503,
            ApiErrorKind::ClientError => 400,
            ApiErrorKind::InvalidRequest => 400,
            ApiErrorKind::CircuitOpen => 503,
            ApiErrorKind::Unexpected => 502,
            ApiErrorKind::ConfigNotFound => 400,
            ApiErrorKind::ApiKeyMissing => 400,
        }
    }

    /// `type` field in the error envelope.
    pub fn type_field(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::RateLimit => "rate_limit",
            ApiErrorKind::AuthFailed => "auth_failed",
            ApiErrorKind::Timeout => "timeout",
            ApiErrorKind::ServerError => "server_error",
            ApiErrorKind::ClientError => "client_error",
            ApiErrorKind::InvalidRequest => "invalid_request",
            ApiErrorKind::CircuitOpen => "circuit_open",
            ApiErrorKind::Unexpected => "api_error",
            ApiErrorKind::ConfigNotFound => "model_not_found",
            ApiErrorKind::ApiKeyMissing => "client_error",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;
