// ── Providers ──────────────────────────────────────────────────────────────
// Per-kind request shaping and response extraction. Dispatch mirrors
// `examples/elisplash-paw/src-tauri/src/engine/providers/mod.rs::AnyProvider`,
// which wraps a `Box<dyn AiProvider>` chosen by `ProviderKind` in
// `AnyProvider::from_config`. Here the dispatch is a plain `match` on
// `ProviderKind` rather than a trait object, since every provider needs
// only two free functions (build the request, extract the reply) instead
// of a stateful long-lived client object — the HTTP client and retry loop
// live one level up in `engine::upstream`.
//
// Result extraction really only has two shapes: Anthropic's
// `content[0].text`, and everything else's `choices[0].message.content`.
// Ollama's OpenAI-compatible chat endpoint falls under "everything else",
// so `ollama` re-exports `openai`'s functions rather than duplicating them.

pub mod anthropic;
pub mod ollama;
pub mod openai;

use crate::atoms::error::ApiError;
use crate::atoms::types::{ChatMessage, ProviderConfig, ProviderKind};
use serde_json::Value;

/// Build the provider-specific JSON request body and headers for one call.
/// `max_tokens` should already be resolved via [`resolve_max_tokens`].
pub fn build_request(
    client: &reqwest::Client,
    cfg: &ProviderConfig,
    messages: &[ChatMessage],
    temperature: Option<f64>,
    max_tokens: Option<i64>,
) -> reqwest::RequestBuilder {
    match cfg.kind {
        ProviderKind::AnthropicStyle => anthropic::build_request(client, cfg, messages, temperature, max_tokens),
        ProviderKind::OpenAIStyle => openai::build_request(client, cfg, messages, temperature, max_tokens),
        ProviderKind::OllamaStyle => ollama::build_request(client, cfg, messages, temperature, max_tokens),
    }
}

/// Extract the assistant's reply text from a successful (2xx) response
/// body.
pub fn extract_reply(kind: ProviderKind, body: &Value) -> Result<String, ApiError> {
    match kind {
        ProviderKind::AnthropicStyle => anthropic::extract_reply(body),
        ProviderKind::OpenAIStyle => openai::extract_reply(body),
        ProviderKind::OllamaStyle => ollama::extract_reply(body),
    }
}

/// Resolve the `max_tokens` to actually send upstream: a client-supplied
/// value of zero or less is treated as "no preference", in which case the
/// catalogue's `max_output_tokens` is used if the catalogue has one.
/// Otherwise the client's value (including `None`) passes through
/// unchanged.
pub fn resolve_max_tokens(requested: Option<i64>, cfg: &ProviderConfig) -> Option<i64> {
    match requested {
        Some(n) if n > 0 => Some(n),
        _ if cfg.max_output_tokens > 0 => Some(cfg.max_output_tokens as i64),
        other => other,
    }
}
