// ── Retry Engine ────────────────────────────────────────────────────────────
// Exponential backoff with a `Retry-After` override, adapted from
// `examples/elisplash-paw/src-tauri/src/engine/http.rs::retry_delay`. The
// teacher sleeps inline inside the delay function; here the delay is
// computed as pure data and the caller (`providers`) awaits it, so the
// schedule itself stays unit-testable without a real clock dependency.

use crate::atoms::constants::{RETRY_BACKOFF_FACTOR, RETRY_INITIAL_BACKOFF, RETRY_MAX_BACKOFF, RETRY_MAX_RETRIES};
use std::time::Duration;

/// Compute the delay before retry attempt `attempt` (0-indexed: the delay
/// before the *first* retry, i.e. after the initial call failed).
/// `retry_after` is the value from a `Retry-After` header on the failed
/// response, if any — it takes precedence over the computed backoff, but
/// is still subject to the same cap.
pub fn compute_delay(attempt: u32, retry_after: Option<Duration>) -> Duration {
    let backoff_ms = (RETRY_INITIAL_BACKOFF.as_millis() as f64 * RETRY_BACKOFF_FACTOR.powi(attempt as i32))
        .min(RETRY_MAX_BACKOFF.as_millis() as f64) as u64;
    let computed = Duration::from_millis(backoff_ms);

    match retry_after {
        Some(d) => d.min(RETRY_MAX_BACKOFF),
        None => computed,
    }
}

/// Number of attempts to make in total (initial call + retries), honoring
/// a per-request override from the client's `retries` field, falling back
/// to the engine default.
pub fn max_attempts(requested_retries: Option<u32>) -> u32 {
    requested_retries.unwrap_or(RETRY_MAX_RETRIES) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_exponentially() {
        let d0 = compute_delay(0, None);
        let d1 = compute_delay(1, None);
        let d2 = compute_delay(2, None);
        assert!(d1 > d0);
        assert!(d2 > d1);
    }

    #[test]
    fn backoff_is_capped() {
        let d = compute_delay(10, None);
        assert_eq!(d, RETRY_MAX_BACKOFF);
    }

    #[test]
    fn retry_after_overrides_computed_backoff() {
        let d = compute_delay(0, Some(Duration::from_secs(2)));
        assert_eq!(d, Duration::from_secs(2));
    }

    #[test]
    fn retry_after_is_still_capped() {
        let d = compute_delay(0, Some(Duration::from_secs(999)));
        assert_eq!(d, RETRY_MAX_BACKOFF);
    }

    #[test]
    fn max_attempts_defaults_to_engine_setting() {
        assert_eq!(max_attempts(None), RETRY_MAX_RETRIES + 1);
    }

    #[test]
    fn max_attempts_honors_client_override() {
        assert_eq!(max_attempts(Some(0)), 1);
        assert_eq!(max_attempts(Some(5)), 6);
    }
}
