// ── OpenAI-style provider ──────────────────────────────────────────────────
// Covers OpenAI itself plus any wire-compatible upstream (Moonshot, Z.ai,
// Ollama's OpenAI-compatible endpoint): `Authorization: Bearer` auth,
// `choices[0].message.content` response shape. Grounded on
// `examples/elisplash-paw/src-tauri/src/engine/providers/openai.rs`, minus
// the Azure `api-key` header variant and SSE streaming, neither of which
// is needed here.

use serde_json::{json, Value};

use crate::atoms::error::{ApiError, ApiErrorKind};
use crate::atoms::types::{ChatMessage, ProviderConfig};

pub fn build_request(
    client: &reqwest::Client,
    cfg: &ProviderConfig,
    messages: &[ChatMessage],
    temperature: Option<f64>,
    max_tokens: Option<i64>,
) -> reqwest::RequestBuilder {
    let mut body = json!({
        "model": cfg.canonical_model,
        "messages": messages.iter().map(|m| json!({"role": m.role, "content": m.content})).collect::<Vec<_>>(),
    });
    if let Some(t) = temperature {
        body["temperature"] = json!(t);
    }
    if let Some(mt) = max_tokens {
        // Reasoning models (o1 and friends) reject the legacy `max_tokens`
        // field and require `max_completion_tokens` instead.
        let field = if cfg.uses_completion_token_field { "max_completion_tokens" } else { "max_tokens" };
        body[field] = json!(mt);
    }

    let mut req = client.post(&cfg.endpoint).json(&body);
    if let Some(key) = &cfg.api_key {
        req = req.bearer_auth(key);
    }
    req
}

pub fn extract_reply(body: &Value) -> Result<String, ApiError> {
    body.get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ApiError::new(ApiErrorKind::Unexpected, "openai-style response missing choices[0].message.content"))
}
