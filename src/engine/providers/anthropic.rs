// ── Anthropic-style provider ───────────────────────────────────────────────
// Request shape and auth header grounded on
// `examples/elisplash-paw/src-tauri/src/engine/providers/anthropic.rs`:
// `x-api-key` + `anthropic-version` headers, messages body keyed by
// `max_tokens` (required by Anthropic, unlike OpenAI where it's optional).
// System-vs-non-system message splitting is carried over from the
// teacher's `format_messages`; tool-use/vision content blocks are not —
// `ChatMessage` here is plain text only.

use serde_json::{json, Value};

use crate::atoms::error::{ApiError, ApiErrorKind};
use crate::atoms::types::{ChatMessage, ProviderConfig};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: i64 = 4096;

pub fn build_request(
    client: &reqwest::Client,
    cfg: &ProviderConfig,
    messages: &[ChatMessage],
    temperature: Option<f64>,
    max_tokens: Option<i64>,
) -> reqwest::RequestBuilder {
    let (system, rest) = split_system(messages);

    let mut body = json!({
        "model": cfg.canonical_model,
        "max_tokens": max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        "messages": rest.iter().map(|m| json!({"role": m.role, "content": m.content})).collect::<Vec<_>>(),
    });
    if let Some(system) = system {
        body["system"] = Value::String(system);
    }
    if let Some(t) = temperature {
        body["temperature"] = json!(t);
    }

    let mut req = client.post(&cfg.endpoint).header("anthropic-version", ANTHROPIC_VERSION).json(&body);
    if let Some(key) = &cfg.api_key {
        req = req.header("x-api-key", key);
    }
    req
}

/// Anthropic folds all `system`-role messages into a single top-level
/// `system` field rather than leaving them in the `messages` array.
fn split_system(messages: &[ChatMessage]) -> (Option<String>, Vec<&ChatMessage>) {
    let mut system_parts = Vec::new();
    let mut rest = Vec::new();
    for m in messages {
        if m.role == "system" {
            system_parts.push(m.content.as_str());
        } else {
            rest.push(m);
        }
    }
    let system = if system_parts.is_empty() { None } else { Some(system_parts.join("\n\n")) };
    (system, rest)
}

pub fn extract_reply(body: &Value) -> Result<String, ApiError> {
    body.get("content")
        .and_then(|c| c.as_array())
        .and_then(|blocks| blocks.first())
        .and_then(|block| block.get("text"))
        .and_then(|t| t.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ApiError::new(ApiErrorKind::Unexpected, "anthropic response missing content[0].text"))
}
