// sigorest-gateway: OpenAI-compatible HTTP gateway multiplexing chat
// completions across heterogeneous upstream LLM providers, with a
// per-model circuit breaker and retry engine.
//
// CLI parsing grounded on
// `examples/elisplash-paw/src-tauri/crates/openpawz-cli/Cargo.toml`'s use
// of `clap` with the `derive` and `env` features; logging grounded on the
// `pawz-code/server` manifest's `log` + `env_logger` pair.

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use clap::Parser;
use tower_http::cors::CorsLayer;

use sigorest_gateway::atoms;
use sigorest_gateway::engine;
use sigorest_gateway::handlers;

use engine::memory::MemoryStore;
use engine::registry::{discover_ollama_models, ollama_shortcode, ModelRegistry};
use engine::sessions::SessionStore;
use engine::state::{default_catalogue_path, default_memory_path, default_sessions_dir, AppState};

#[derive(Parser, Debug)]
#[command(name = "sigorest-gateway", about = "OpenAI-compatible multi-provider chat completion gateway")]
struct Cli {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "GATEWAY_BIND", default_value = "0.0.0.0:8080")]
    bind: String,

    /// Directory holding the model catalogue, session files, and memory
    /// preamble. Created if missing.
    #[arg(long, env = "GATEWAY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Base URL of a local Ollama daemon to probe for auto-discovered
    /// models at startup. Pass an empty string to disable discovery.
    #[arg(long, env = "OLLAMA_BASE_URL", default_value = "http://localhost:11434")]
    ollama_base_url: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(cli).await {
        log::error!("fatal: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let catalogue_path = default_catalogue_path(&data_dir);
    let mut registry = ModelRegistry::load(&catalogue_path)?;
    log::info!("loaded {} catalogue entries from {:?}", registry.len(), catalogue_path);

    let memory = MemoryStore::open(default_memory_path(&data_dir))?;
    let sessions = SessionStore::open(default_sessions_dir(&data_dir))?;

    let http = reqwest::Client::new();
    if !cli.ollama_base_url.is_empty() {
        let discovered = discover_ollama_models(&http, &cli.ollama_base_url).await;
        for name in discovered {
            let shortcode = ollama_shortcode(&name);
            log::info!("discovered local ollama model: {name} (shortcode {shortcode})");
            registry.insert(atoms::types::ModelEntry {
                id: name.clone(),
                shortcode,
                endpoint: format!("{}/v1/chat/completions", cli.ollama_base_url.trim_end_matches('/')),
                credential_env_name: String::new(),
                // Ollama interprets the payload itself; the gateway has no
                // catalogued cost or token-limit data for these models.
                max_input_tokens: 0,
                max_output_tokens: 0,
                input_cost_per_mtok: 0.0,
                output_cost_per_mtok: 0.0,
                min_temperature: 0.0,
                max_temperature: 2.0,
                uses_completion_token_field: false,
            });
        }
    }

    let state = Arc::new(AppState::new(registry, memory, sessions)?);

    let app = Router::new()
        .route("/v1/chat/completions", axum::routing::post(handlers::chat::chat_completions))
        .route("/v1/models", get(handlers::models::list_models))
        .route("/api/models", get(handlers::models::list_full_models))
        .route("/api/health", get(handlers::health::health))
        .route("/api/memory", get(handlers::memory::get_memory).put(handlers::memory::put_memory))
        .layer(CorsLayer::permissive())
        .with_state(state);

    log::info!("listening on {}", cli.bind);
    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("sigorest-gateway")
}
