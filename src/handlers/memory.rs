// ── GET/PUT /api/memory ────────────────────────────────────────────────────
// Reads or replaces the shared memory preamble used by the composer.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::atoms::error::{ApiError, ApiErrorKind};
use crate::atoms::types::MemoryBlock;
use crate::engine::state::AppState;
use crate::handlers::error_response;

pub async fn get_memory(State(state): State<Arc<AppState>>) -> Response {
    Json(state.memory.get()).into_response()
}

pub async fn put_memory(State(state): State<Arc<AppState>>, Json(block): Json<MemoryBlock>) -> Response {
    match state.memory.set(block) {
        Ok(()) => Json(state.memory.get()).into_response(),
        Err(e) => error_response(&ApiError::new(ApiErrorKind::Unexpected, e.to_string())),
    }
}
