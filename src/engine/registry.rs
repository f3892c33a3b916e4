// ── Model Registry ─────────────────────────────────────────────────────────
// Loads the model catalogue (semicolon-delimited CSV), resolves a
// client-supplied model identifier (canonical id or shortcode) to a
// `ModelEntry`, and discovers locally running Ollama models at startup.
// The "prefer the on-disk file over the embedded default" pattern and the
// resolver's overall shape are grounded on
// `examples/elisplash-paw/src-tauri/src/engine/state.rs::normalize_model_name`
// and `resolve_provider_for_model`; the disk-catalogue idea itself is
// grounded on `EngineState::new`'s "load config from store, or fall back
// to `Default::default()`" pattern applied to a file instead of a DB row.

use std::collections::HashMap;
use std::path::Path;

use crate::atoms::error::{ApiError, ApiErrorKind, EngineResult};
use crate::atoms::types::{ModelEntry, ProviderConfig};

const EMBEDDED_CATALOGUE: &str = include_str!("../../catalog/models.csv");

pub struct ModelRegistry {
    by_id: HashMap<String, ModelEntry>,
    by_shortcode: HashMap<String, String>,
}

impl ModelRegistry {
    /// Load the catalogue from `path` if it exists, otherwise fall back to
    /// the embedded default shipped with the binary.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let raw = if path.exists() {
            std::fs::read_to_string(path)?
        } else {
            EMBEDDED_CATALOGUE.to_string()
        };
        Ok(Self::parse(&raw))
    }

    /// Parse catalogue rows. A malformed row (fewer than 10 semicolon
    /// fields) is warned about and skipped rather than failing the whole
    /// load — one bad line in an operator-edited catalogue file shouldn't
    /// take the rest of the fleet offline.
    fn parse(raw: &str) -> Self {
        let mut by_id = HashMap::new();
        let mut by_shortcode = HashMap::new();

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let cols: Vec<&str> = line.split(';').map(str::trim).collect();
            if cols.len() < 10 {
                log::warn!("skipping malformed catalogue line ({} columns, need at least 10): {line}", cols.len());
                continue;
            }
            let entry = ModelEntry {
                id: cols[0].to_string(),
                shortcode: cols[1].to_string(),
                endpoint: cols[2].to_string(),
                credential_env_name: cols[3].to_string(),
                max_input_tokens: cols[4].parse().unwrap_or(0),
                max_output_tokens: cols[5].parse().unwrap_or(0),
                input_cost_per_mtok: cols[6].parse().unwrap_or(0.0),
                output_cost_per_mtok: cols[7].parse().unwrap_or(0.0),
                min_temperature: cols[8].parse().unwrap_or(0.0),
                max_temperature: cols[9].parse().unwrap_or(2.0),
                uses_completion_token_field: cols.get(10).map(|v| *v == "true").unwrap_or(false),
            };
            by_shortcode.insert(entry.shortcode.clone(), entry.id.clone());
            by_id.insert(entry.id.clone(), entry);
        }

        Self { by_id, by_shortcode }
    }

    /// Resolve a client-supplied model string: try canonical id first,
    /// then shortcode.
    pub fn resolve(&self, requested: &str) -> Option<&ModelEntry> {
        self.by_id
            .get(requested)
            .or_else(|| self.by_shortcode.get(requested).and_then(|id| self.by_id.get(id)))
    }

    pub fn all(&self) -> impl Iterator<Item = &ModelEntry> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Build the resolved per-call provider configuration for `entry`,
    /// reading its credential from the environment. Keyless entries
    /// (`credential_env_name` empty, i.e. Ollama) skip the lookup
    /// entirely; entries that declare a variable but find it unset fail
    /// closed with `ApiErrorKind::ApiKeyMissing`.
    pub fn provider_config(&self, entry: &ModelEntry) -> Result<ProviderConfig, ApiError> {
        let api_key = if entry.credential_env_name.is_empty() {
            None
        } else {
            match std::env::var(&entry.credential_env_name) {
                Ok(v) => Some(v),
                Err(_) => {
                    return Err(ApiError::new(
                        ApiErrorKind::ApiKeyMissing,
                        format!("environment variable {} is not set", entry.credential_env_name),
                    ))
                }
            }
        };

        Ok(ProviderConfig {
            endpoint: entry.endpoint.clone(),
            canonical_model: entry.id.clone(),
            api_key,
            kind: entry.provider_kind(),
            max_output_tokens: entry.max_output_tokens,
            uses_completion_token_field: entry.uses_completion_token_field,
        })
    }

    /// Register a model discovered at runtime (e.g. via Ollama discovery),
    /// without requiring a catalogue file edit.
    pub fn insert(&mut self, entry: ModelEntry) {
        self.by_shortcode.insert(entry.shortcode.clone(), entry.id.clone());
        self.by_id.insert(entry.id.clone(), entry);
    }
}

/// Derive a shortcode from a raw Ollama model name: replace `:` with `-`
/// and drop a trailing `-latest` tag, grounded on the same normalization
/// idiom as `normalize_model_name` in the teacher.
pub fn ollama_shortcode(model_name: &str) -> String {
    let replaced = model_name.replace(':', "-");
    replaced.strip_suffix("-latest").unwrap_or(&replaced).to_string()
}

/// Query a local Ollama daemon's `/api/tags` endpoint and return the model
/// names it reports. Reachability-check idiom grounded on
/// `examples/elisplash-paw/src-tauri/src/engine/memory.rs::check_ollama_reachable`
/// (plain `reqwest::Client` hit against a local endpoint, no pinned TLS —
/// Ollama is always loopback/LAN here).
pub async fn discover_ollama_models(client: &reqwest::Client, base_url: &str) -> Vec<String> {
    #[derive(serde::Deserialize)]
    struct TagsResponse {
        models: Vec<TagEntry>,
    }
    #[derive(serde::Deserialize)]
    struct TagEntry {
        name: String,
    }

    let url = format!("{}/api/tags", base_url.trim_end_matches('/'));
    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => match resp.json::<TagsResponse>().await {
            Ok(tags) => tags.models.into_iter().map(|m| m.name).collect(),
            Err(_) => Vec::new(),
        },
        _ => Vec::new(),
    }
}
