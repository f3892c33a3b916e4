// ── Atoms: Configuration Defaults ────────────────────────────────────────
// Pure constants shared across the breaker, retry engine, and request
// handling — every numeric default a request can fall back to lives here
// instead of scattered through the modules that use it.

use std::time::Duration;

// ── Circuit breaker defaults ──────────────────────────────────────────────

pub const BREAKER_THRESHOLD: u32 = 5;
pub const BREAKER_WINDOW: Duration = Duration::from_secs(60);
pub const BREAKER_COOLDOWN: Duration = Duration::from_secs(10);
pub const BREAKER_HALF_OPEN_MAX: u32 = 3;

// ── Retry engine defaults ──────────────────────────────────────────────────

pub const RETRY_MAX_RETRIES: u32 = 3;
pub const RETRY_INITIAL_BACKOFF: Duration = Duration::from_millis(500);
pub const RETRY_MAX_BACKOFF: Duration = Duration::from_secs(5);
pub const RETRY_BACKOFF_FACTOR: f64 = 2.0;

// ── Per-request defaults ────────────────────────────────────────────────────

pub const DEFAULT_TIMEOUT_SECS: u64 = 180;
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_TEMPERATURE: f64 = 1.0;

// ── Session store ───────────────────────────────────────────────────────────

pub const SESSION_MAX_TURNS: usize = 20;
