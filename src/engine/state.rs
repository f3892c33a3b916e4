// ── Shared Application State ───────────────────────────────────────────────
// One struct holding every piece of state a request handler needs,
// grounded on `examples/elisplash-paw/src-tauri/src/engine/state.rs::EngineState`
// (a single struct of shared, independently-lockable fields constructed by
// `EngineState::new()`). Lock ordering: server-level `RwLock` fields are
// only ever read/written one at a time; a per-model breaker's own
// `Mutex` (internal to `CircuitBreaker`) is never held while acquiring the
// `models`/`memory` lock above it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::atoms::error::EngineResult;
use crate::engine::circuit_breaker::CircuitBreaker;
use crate::engine::memory::MemoryStore;
use crate::engine::registry::ModelRegistry;
use crate::engine::sessions::SessionStore;

pub struct AppState {
    pub http: reqwest::Client,
    pub registry: RwLock<ModelRegistry>,
    pub breakers: RwLock<HashMap<String, Arc<CircuitBreaker>>>,
    pub memory: MemoryStore,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(registry: ModelRegistry, memory: MemoryStore, sessions: SessionStore) -> EngineResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| crate::atoms::error::EngineError::Other(e.to_string()))?;

        Ok(Self {
            http,
            registry: RwLock::new(registry),
            breakers: RwLock::new(HashMap::new()),
            memory,
            sessions,
        })
    }

    /// Get or lazily create the breaker for `model_id`. Takes the
    /// `breakers` write lock only on first use of a given model.
    pub fn breaker_for(&self, model_id: &str) -> Arc<CircuitBreaker> {
        if let Some(b) = self.breakers.read().get(model_id) {
            return b.clone();
        }
        let mut write = self.breakers.write();
        write.entry(model_id.to_string()).or_insert_with(|| Arc::new(CircuitBreaker::default())).clone()
    }
}

/// Default on-disk layout, rooted under the user's data directory unless
/// overridden via CLI flags.
pub fn default_sessions_dir(base: &PathBuf) -> PathBuf {
    base.join("sessions")
}

pub fn default_memory_path(base: &PathBuf) -> PathBuf {
    base.join("memory.json")
}

pub fn default_catalogue_path(base: &PathBuf) -> PathBuf {
    base.join("models.csv")
}
