// ── Upstream Caller ────────────────────────────────────────────────────────
// Ties together circuit breaker admission, request dispatch, response
// classification, and the retry loop into the single call an
// orchestrator makes per chat completion. Grounded on the retry-loop
// shape in `examples/elisplash-paw/src-tauri/src/engine/providers/anthropic.rs::chat_stream_inner`
// (`for attempt in 0..=MAX_RETRIES { ... }`), generalized so every
// provider kind shares one loop instead of duplicating it per provider —
// the teacher repeats this loop nearly verbatim in both `anthropic.rs` and
// `openai.rs`; this consolidates it into one.

use std::time::Duration;

use crate::atoms::error::{ApiError, ApiErrorKind};
use crate::atoms::types::{ChatMessage, ProviderConfig};
use crate::engine::circuit_breaker::CircuitBreaker;
use crate::engine::classifier::{classify_http_status, classify_transport_error, parse_retry_after};
use crate::engine::providers;
use crate::engine::retry::{compute_delay, max_attempts};

/// Perform one logical chat completion call against `cfg`, retrying on
/// retryable classifications up to `requested_retries` (or the engine
/// default), honoring the circuit breaker's admission decision before
/// every attempt.
pub async fn call(
    client: &reqwest::Client,
    cfg: &ProviderConfig,
    breaker: &CircuitBreaker,
    messages: &[ChatMessage],
    temperature: Option<f64>,
    max_tokens: Option<i64>,
    requested_retries: Option<u32>,
) -> Result<String, ApiError> {
    let attempts = max_attempts(requested_retries);
    let mut last_err: Option<ApiError> = None;
    let resolved_max_tokens = providers::resolve_max_tokens(max_tokens, cfg);

    for attempt in 0..attempts {
        breaker.admit()?;

        let req = providers::build_request(client, cfg, messages, temperature, resolved_max_tokens);
        let outcome = req.send().await;

        let err = match outcome {
            Ok(resp) => {
                let status = resp.status().as_u16();
                let retry_after = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_retry_after);

                if status < 300 {
                    match resp.json::<serde_json::Value>().await {
                        Ok(body) => match providers::extract_reply(cfg.kind, &body) {
                            Ok(text) => {
                                breaker.record_success();
                                return Ok(text);
                            }
                            Err(e) => e,
                        },
                        Err(e) => ApiError::new(ApiErrorKind::Unexpected, e.to_string()),
                    }
                } else {
                    let body_text = resp.text().await.unwrap_or_default();
                    classify_http_status(status, &body_text, retry_after)
                }
            }
            Err(e) => classify_transport_error(&e),
        };

        let retryable = err.retryable();
        if retryable {
            breaker.record_failure();
        }

        if matches!(err.kind, ApiErrorKind::AuthFailed) {
            return Err(err);
        }

        let is_last_attempt = attempt + 1 == attempts;

        if !retryable || is_last_attempt {
            last_err = Some(err);
            break;
        }

        let delay = compute_delay(attempt, err.retry_after.map(Duration::from_secs));
        tokio::time::sleep(delay).await;
        last_err = Some(err);
    }

    Err(last_err.unwrap_or_else(|| ApiError::new(ApiErrorKind::Unexpected, "exhausted retries with no recorded error")))
}
