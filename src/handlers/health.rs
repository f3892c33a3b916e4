// ── GET /api/health ─────────────────────────────────────────────────────────
// Reports liveness plus a snapshot of every circuit breaker that has seen
// at least one call, so operators can see which models are currently
// tripped without needing a separate metrics endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::atoms::types::HealthResponse;
use crate::engine::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let breakers = state.breakers.read();
    let circuit_breakers = breakers.iter().map(|(model, b)| b.health(model)).collect();
    let available_models = state.registry.read().len();
    let memory_set = state.memory.is_set();

    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().timestamp(),
        available_models,
        circuit_breakers,
        memory_set,
    })
    .into_response()
}
