// ── Ollama-style provider ──────────────────────────────────────────────────
// Locally discovered Ollama models are reached through Ollama's
// OpenAI-compatible `/v1/chat/completions` endpoint, so request shaping
// and response extraction are identical to `openai` — no auth header is
// sent since keyless entries carry no `api_key`. This re-export keeps a
// distinct module (and a distinct `ProviderKind` for registry dispatch)
// without duplicating the request/extraction logic.

pub use super::openai::{build_request, extract_reply};
