// ── GET /v1/models, GET /api/models ───────────────────────────────────────
// `/v1/models` lists in the OpenAI-compatible shape, under both the
// canonical id and the shortcode clients may also address a model by
// (deduplicated when they're equal). `/api/models` is gateway-specific:
// it returns the full catalogue rows, endpoint/cost/token-limit fields
// included, for operators rather than OpenAI-compatible clients.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::atoms::types::{ModelEntry, ModelListEntry, ModelListResponse};
use crate::engine::state::AppState;

pub async fn list_models(State(state): State<Arc<AppState>>) -> Response {
    let registry = state.registry.read();
    let mut data: Vec<ModelListEntry> = Vec::new();
    for e in registry.all() {
        data.push(ModelListEntry { id: e.id.clone(), object: "model", created: 0, owned_by: "sigorest" });
        if e.shortcode != e.id {
            data.push(ModelListEntry { id: e.shortcode.clone(), object: "model", created: 0, owned_by: "sigorest" });
        }
    }
    Json(ModelListResponse { object: "list", data }).into_response()
}

pub async fn list_full_models(State(state): State<Arc<AppState>>) -> Response {
    let registry = state.registry.read();
    let data: Vec<ModelEntry> = registry.all().cloned().collect();
    Json(data).into_response()
}
