// ── Atoms: Pure Data Types ────────────────────────────────────────────────
// Struct/enum definitions with no logic beyond simple derives and small
// pure helpers. No I/O, no locking, no imports from `engine`.

use serde::{Deserialize, Serialize};

// ── Provider kind ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    OpenAIStyle,
    AnthropicStyle,
    OllamaStyle,
}

// ── Model catalogue entry ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub shortcode: String,
    pub endpoint: String,
    /// Name of the environment variable holding the credential. Empty for
    /// keyless providers (Ollama).
    pub credential_env_name: String,
    pub max_input_tokens: u64,
    pub max_output_tokens: u64,
    pub input_cost_per_mtok: f64,
    pub output_cost_per_mtok: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub uses_completion_token_field: bool,
}

impl ModelEntry {
    /// Derive the `ProviderKind` from the endpoint / credential shape.
    pub fn provider_kind(&self) -> ProviderKind {
        if self.endpoint.contains("anthropic") {
            ProviderKind::AnthropicStyle
        } else if self.credential_env_name.is_empty() {
            ProviderKind::OllamaStyle
        } else {
            ProviderKind::OpenAIStyle
        }
    }
}

// ── Resolved per-call provider configuration ──────────────────────────────

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub canonical_model: String,
    pub api_key: Option<String>,
    pub kind: ProviderKind,
    /// Catalogue cap on completion tokens; 0 means "no cap known" (e.g.
    /// locally discovered Ollama models).
    pub max_output_tokens: u64,
    /// Whether this upstream expects `max_completion_tokens` instead of
    /// the legacy `max_tokens` field (reasoning models such as `o1`).
    pub uses_completion_token_field: bool,
}

// ── Chat message shape (OpenAI-compatible wire format) ───────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

// ── Client-facing chat completion request ─────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Nullable so "absent" (use the engine default) and "zero"
    /// (deterministic sampling) are distinguishable.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_tokens: Option<i64>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub retries: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionChoice {
    pub index: u32,
    pub message: ChatMessage,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
}

// ── Error envelope ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

// ── Memory block ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub content: String,
    pub cache_hint: bool,
}

// ── Session turn ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionDocument {
    pub history: Vec<SessionTurn>,
}

// ── /v1/models, /api/models listing shapes ─────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ModelListEntry {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub owned_by: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelListResponse {
    pub object: &'static str,
    pub data: Vec<ModelListEntry>,
}

// ── /api/health shapes ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BreakerDetails {
    pub state: String,
    pub threshold: u32,
    pub window_seconds: u64,
    pub cooldown_seconds: u64,
    pub half_open_max: u32,
    pub half_open_attempts: u32,
    pub last_state_change: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakerHealth {
    pub model: String,
    pub open: bool,
    pub failures: usize,
    pub details: BreakerDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: i64,
    pub available_models: usize,
    pub circuit_breakers: Vec<BreakerHealth>,
    pub memory_set: bool,
}
