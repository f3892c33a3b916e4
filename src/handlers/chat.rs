// ── POST /v1/chat/completions ──────────────────────────────────────────────
// The gateway orchestrator: resolve the model, compose the message list
// from memory + session history + the client's own messages, dispatch
// upstream through the circuit breaker and retry engine, then persist the
// exchange back to the session store. Grounded on
// `examples/elisplash-paw/src-tauri/src/engine/state.rs::resolve_provider_for_model`
// for the "resolve, then dispatch" shape, though the actual HTTP wiring
// (axum extractors, JSON response) is written fresh since no axum-based
// handler source was retrieved for the teacher's `pawz-code/server` crate.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::atoms::error::{ApiError, ApiErrorKind};
use crate::atoms::types::{
    ChatCompletionChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, SessionTurn,
};
use crate::atoms::constants::{DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS};
use crate::engine::composer;
use crate::engine::state::AppState;
use crate::engine::upstream;
use crate::handlers::error_response;

pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatCompletionRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return error_response(&ApiError::new(ApiErrorKind::InvalidRequest, rejection.body_text()).with_status(400));
        }
    };
    match handle(&state, req).await {
        Ok(resp) => Json(resp).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn handle(state: &AppState, req: ChatCompletionRequest) -> Result<ChatCompletionResponse, ApiError> {
    if req.messages.is_empty() {
        return Err(ApiError::new(ApiErrorKind::ClientError, "messages must not be empty").with_status(400));
    }

    let entry = {
        let registry = state.registry.read();
        registry
            .resolve(&req.model)
            .cloned()
            .ok_or_else(|| ApiError::new(ApiErrorKind::ConfigNotFound, format!("unknown model: {}", req.model)).with_status(400))?
    };

    let provider_cfg = state.registry.read().provider_config(&entry)?;

    let temperature = req.temperature.unwrap_or(DEFAULT_TEMPERATURE).clamp(entry.min_temperature, entry.max_temperature);

    let session_id = req.session_id.clone();
    let history = match &session_id {
        Some(sid) => {
            state.sessions.load(&req.model, sid).map_err(|e| ApiError::new(ApiErrorKind::Unexpected, e.to_string()))?.history
        }
        None => Vec::new(),
    };

    let memory = state.memory.get();
    let composed = composer::compose(&memory, &history, &req.messages);

    let breaker = state.breaker_for(&entry.id);

    let timeout_secs = req.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
    let reply_text = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        upstream::call(&state.http, &provider_cfg, &breaker, &composed, Some(temperature), req.max_tokens, req.retries),
    )
    .await
    .map_err(|_| ApiError::new(ApiErrorKind::Timeout, format!("request exceeded {timeout_secs}s timeout")).with_status(504))??;

    if let Some(sid) = &session_id {
        let mut turns: Vec<SessionTurn> = req
            .messages
            .iter()
            .map(|m| SessionTurn { role: m.role.clone(), content: m.content.clone() })
            .collect();
        turns.push(SessionTurn { role: "assistant".to_string(), content: reply_text.clone() });
        state
            .sessions
            .append(&req.model, sid, &turns)
            .map_err(|e| ApiError::new(ApiErrorKind::Unexpected, e.to_string()))?;
    }

    Ok(ChatCompletionResponse {
        id: format!("chatcmpl-{}", Uuid::new_v4()),
        object: "chat.completion",
        created: chrono::Utc::now().timestamp(),
        model: req.model,
        choices: vec![ChatCompletionChoice {
            index: 0,
            message: ChatMessage { role: "assistant".to_string(), content: reply_text },
        }],
    })
}
