// ── Circuit Breaker ─────────────────────────────────────────────────────────
// Per-model, 3-state machine (Closed/Open/HalfOpen) backed by a sliding
// window of failure timestamps. Generalizes
// `examples/elisplash-paw/src-tauri/src/engine/http.rs::CircuitBreaker`,
// which tracks only a consecutive-failure `AtomicU32` plus a single
// `tripped_at` timestamp — that shape can represent Closed/Open but not a
// bounded-trial HalfOpen state, so state here is a `parking_lot::Mutex`
// guarding a small struct instead of bare atomics.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

use crate::atoms::constants::{BREAKER_COOLDOWN, BREAKER_HALF_OPEN_MAX, BREAKER_THRESHOLD, BREAKER_WINDOW};
use crate::atoms::error::{ApiError, ApiErrorKind};
use crate::atoms::types::{BreakerDetails, BreakerHealth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

impl BreakerState {
    fn label(self) -> &'static str {
        match self {
            BreakerState::Closed => "closed",
            BreakerState::Open => "open",
            BreakerState::HalfOpen => "half_open",
        }
    }
}

struct Inner {
    state: BreakerState,
    /// Timestamps of failures within the sliding window. Pruned lazily on
    /// every observation rather than with a background sweep.
    failures: Vec<Instant>,
    /// When the breaker tripped to Open, or re-entered HalfOpen.
    state_entered_at: Instant,
    /// Trial calls admitted since entering HalfOpen.
    half_open_attempts: u32,
}

/// One breaker per model, held behind a `Mutex`; this per-breaker lock is
/// never taken while holding the server-level `RwLock`.
pub struct CircuitBreaker {
    threshold: u32,
    window: Duration,
    cooldown: Duration,
    half_open_max: u32,
    inner: Mutex<Inner>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(BREAKER_THRESHOLD, BREAKER_WINDOW, BREAKER_COOLDOWN, BREAKER_HALF_OPEN_MAX)
    }
}

impl CircuitBreaker {
    pub fn new(threshold: u32, window: Duration, cooldown: Duration, half_open_max: u32) -> Self {
        Self {
            threshold,
            window,
            cooldown,
            half_open_max,
            inner: Mutex::new(Inner {
                state: BreakerState::Closed,
                failures: Vec::new(),
                state_entered_at: Instant::now(),
                half_open_attempts: 0,
            }),
        }
    }

    /// Call before dispatching a request. Returns `Err(CircuitOpen)` if the
    /// breaker is open and the cooldown hasn't elapsed, or if it is
    /// half-open and the trial quota is already exhausted.
    pub fn admit(&self) -> Result<(), ApiError> {
        let mut g = self.inner.lock();
        match g.state {
            BreakerState::Closed => Ok(()),
            BreakerState::Open => {
                if g.state_entered_at.elapsed() >= self.cooldown {
                    g.state = BreakerState::HalfOpen;
                    g.state_entered_at = Instant::now();
                    g.half_open_attempts = 1;
                    Ok(())
                } else {
                    Err(ApiError::new(ApiErrorKind::CircuitOpen, "circuit breaker open"))
                }
            }
            BreakerState::HalfOpen => {
                if g.half_open_attempts < self.half_open_max {
                    g.half_open_attempts += 1;
                    Ok(())
                } else {
                    Err(ApiError::new(ApiErrorKind::CircuitOpen, "circuit breaker half-open trial quota exhausted"))
                }
            }
        }
    }

    pub fn record_success(&self) {
        let mut g = self.inner.lock();
        match g.state {
            BreakerState::HalfOpen => {
                g.state = BreakerState::Closed;
                g.failures.clear();
                g.half_open_attempts = 0;
                g.state_entered_at = Instant::now();
            }
            BreakerState::Closed => {
                g.failures.clear();
            }
            BreakerState::Open => {}
        }
    }

    pub fn record_failure(&self) {
        let mut g = self.inner.lock();
        let now = Instant::now();
        match g.state {
            BreakerState::HalfOpen => {
                g.state = BreakerState::Open;
                g.state_entered_at = now;
                g.half_open_attempts = 0;
                g.failures.clear();
            }
            BreakerState::Closed => {
                g.failures.push(now);
                let window = self.window;
                g.failures.retain(|t| now.duration_since(*t) <= window);
                if g.failures.len() as u32 >= self.threshold {
                    g.state = BreakerState::Open;
                    g.state_entered_at = now;
                    g.failures.clear();
                }
            }
            BreakerState::Open => {}
        }
    }

    pub fn health(&self, model: &str) -> BreakerHealth {
        let g = self.inner.lock();
        let state = g.state;
        BreakerHealth {
            model: model.to_string(),
            open: state == BreakerState::Open,
            failures: g.failures.len(),
            details: BreakerDetails {
                state: state.label().to_string(),
                threshold: self.threshold,
                window_seconds: self.window.as_secs(),
                cooldown_seconds: self.cooldown.as_secs(),
                half_open_max: self.half_open_max,
                half_open_attempts: g.half_open_attempts,
                last_state_change: format!("{:?} ago", g.state_entered_at.elapsed()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn fast_breaker() -> CircuitBreaker {
        CircuitBreaker::new(3, Duration::from_secs(60), Duration::from_millis(20), 2)
    }

    #[test]
    fn closed_admits_until_threshold() {
        let cb = fast_breaker();
        for _ in 0..2 {
            assert!(cb.admit().is_ok());
            cb.record_failure();
        }
        // third failure trips it
        assert!(cb.admit().is_ok());
        cb.record_failure();
        assert!(cb.admit().is_err());
    }

    #[test]
    fn success_resets_failure_count() {
        let cb = fast_breaker();
        cb.record_failure();
        cb.record_failure();
        cb.record_success();
        cb.record_failure();
        cb.record_failure();
        // only 2 failures counted since reset, still closed
        assert!(cb.admit().is_ok());
    }

    #[test]
    fn open_transitions_to_half_open_after_cooldown() {
        let cb = fast_breaker();
        for _ in 0..3 {
            cb.record_failure();
        }
        assert!(cb.admit().is_err());
        sleep(Duration::from_millis(30));
        assert!(cb.admit().is_ok());
    }

    #[test]
    fn half_open_trial_quota_is_bounded() {
        let cb = fast_breaker();
        for _ in 0..3 {
            cb.record_failure();
        }
        sleep(Duration::from_millis(30));
        assert!(cb.admit().is_ok());
        assert!(cb.admit().is_ok());
        assert!(cb.admit().is_err());
    }

    #[test]
    fn half_open_failure_reopens_immediately() {
        let cb = fast_breaker();
        for _ in 0..3 {
            cb.record_failure();
        }
        sleep(Duration::from_millis(30));
        assert!(cb.admit().is_ok());
        cb.record_failure();
        assert!(cb.admit().is_err());
    }

    #[test]
    fn half_open_success_closes_breaker() {
        let cb = fast_breaker();
        for _ in 0..3 {
            cb.record_failure();
        }
        sleep(Duration::from_millis(30));
        assert!(cb.admit().is_ok());
        cb.record_success();
        let h = cb.health("m");
        assert_eq!(h.details.state, "closed");
    }
}
