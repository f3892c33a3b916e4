// ── Gateway integration scenarios ──────────────────────────────────────────
// Stubs the upstream provider over real HTTP with `wiremock` and drives
// `engine::upstream::call` directly — grounded on the "stub the actual
// HTTP boundary, assert on the client's resulting behavior" idiom common
// across the example pack's provider clients, since no axum-server test
// harness was retrievable from the teacher's `pawz-code/server` crate.

use std::time::Duration;

use sigorest_gateway::atoms::types::{ChatMessage, ProviderConfig, ProviderKind};
use sigorest_gateway::engine::circuit_breaker::CircuitBreaker;
use sigorest_gateway::engine::upstream;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_message() -> Vec<ChatMessage> {
    vec![ChatMessage { role: "user".to_string(), content: "hello".to_string() }]
}

fn fast_breaker() -> CircuitBreaker {
    CircuitBreaker::new(5, Duration::from_secs(60), Duration::from_millis(20), 3)
}

// Scenario A: happy path against an OpenAI-style upstream.
#[tokio::test]
async fn scenario_a_openai_style_happy_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "hi there"}}]
        })))
        .mount(&server)
        .await;

    let cfg = ProviderConfig {
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        canonical_model: "gpt-4o".to_string(),
        api_key: Some("test-key".to_string()),
        kind: ProviderKind::OpenAIStyle,
        max_output_tokens: 0,
        uses_completion_token_field: false,
    };
    let client = reqwest::Client::new();
    let breaker = fast_breaker();

    let reply = upstream::call(&client, &cfg, &breaker, &user_message(), Some(0.7), None, Some(0)).await.unwrap();
    assert_eq!(reply, "hi there");
}

// Scenario B: happy path against an Anthropic-style upstream, which shapes
// its response as `content[0].text` instead of `choices[0].message.content`.
#[tokio::test]
async fn scenario_b_anthropic_style_extraction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": "hello from claude"}]
        })))
        .mount(&server)
        .await;

    let cfg = ProviderConfig {
        endpoint: format!("{}/v1/messages", server.uri()),
        canonical_model: "claude-3-5-sonnet-latest".to_string(),
        api_key: Some("test-key".to_string()),
        kind: ProviderKind::AnthropicStyle,
        max_output_tokens: 0,
        uses_completion_token_field: false,
    };
    let client = reqwest::Client::new();
    let breaker = fast_breaker();

    let reply = upstream::call(&client, &cfg, &breaker, &user_message(), None, Some(1024), Some(0)).await.unwrap();
    assert_eq!(reply, "hello from claude");
}

// Scenario C: five consecutive failures trip the breaker; the sixth call
// never reaches the network because `admit()` rejects it.
#[tokio::test]
async fn scenario_c_breaker_opens_after_threshold() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let cfg = ProviderConfig {
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        canonical_model: "gpt-4o".to_string(),
        api_key: Some("test-key".to_string()),
        kind: ProviderKind::OpenAIStyle,
        max_output_tokens: 0,
        uses_completion_token_field: false,
    };
    let client = reqwest::Client::new();
    let breaker = CircuitBreaker::new(5, Duration::from_secs(60), Duration::from_secs(60), 3);

    for _ in 0..5 {
        let _ = upstream::call(&client, &cfg, &breaker, &user_message(), None, None, Some(0)).await;
    }

    let result = upstream::call(&client, &cfg, &breaker, &user_message(), None, None, Some(0)).await;
    let err = result.unwrap_err();
    assert_eq!(err.kind, sigorest_gateway::atoms::error::ApiErrorKind::CircuitOpen);
}

// Scenario D: the breaker transitions to half-open after cooldown and a
// single success closes it again.
#[tokio::test]
async fn scenario_d_half_open_recovery() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "recovered"}}]
        })))
        .mount(&server)
        .await;

    let cfg = ProviderConfig {
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        canonical_model: "gpt-4o".to_string(),
        api_key: Some("test-key".to_string()),
        kind: ProviderKind::OpenAIStyle,
        max_output_tokens: 0,
        uses_completion_token_field: false,
    };
    let client = reqwest::Client::new();
    let breaker = CircuitBreaker::new(3, Duration::from_secs(60), Duration::from_millis(20), 3);

    for _ in 0..3 {
        let _ = upstream::call(&client, &cfg, &breaker, &user_message(), None, None, Some(0)).await;
    }
    assert!(breaker.admit().is_err());

    tokio::time::sleep(Duration::from_millis(30)).await;

    let reply = upstream::call(&client, &cfg, &breaker, &user_message(), None, None, Some(2)).await.unwrap();
    assert_eq!(reply, "recovered");
}

// Scenario E: a 429 with Retry-After causes exactly one retry, and the
// retried request succeeds.
#[tokio::test]
async fn scenario_e_retry_after_is_honored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "after the wait"}}]
        })))
        .mount(&server)
        .await;

    let cfg = ProviderConfig {
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        canonical_model: "gpt-4o".to_string(),
        api_key: Some("test-key".to_string()),
        kind: ProviderKind::OpenAIStyle,
        max_output_tokens: 0,
        uses_completion_token_field: false,
    };
    let client = reqwest::Client::new();
    let breaker = fast_breaker();

    let reply = upstream::call(&client, &cfg, &breaker, &user_message(), None, None, Some(2)).await.unwrap();
    assert_eq!(reply, "after the wait");
}

// Scenario F: an auth failure is never retried, even with retries
// available, and surfaces immediately.
#[tokio::test]
async fn scenario_f_auth_failure_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = ProviderConfig {
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        canonical_model: "gpt-4o".to_string(),
        api_key: Some("bad-key".to_string()),
        kind: ProviderKind::OpenAIStyle,
        max_output_tokens: 0,
        uses_completion_token_field: false,
    };
    let client = reqwest::Client::new();
    let breaker = fast_breaker();

    let result = upstream::call(&client, &cfg, &breaker, &user_message(), None, None, Some(3)).await;
    let err = result.unwrap_err();
    assert_eq!(err.kind, sigorest_gateway::atoms::error::ApiErrorKind::AuthFailed);
}

// Scenario G: a client sending malformed requests that upstream rejects
// with repeated 400s never trips the breaker — only retryable failures
// count toward the failure window, and a 400 is never retryable.
#[tokio::test]
async fn scenario_g_repeated_client_errors_never_open_breaker() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&server)
        .await;

    let cfg = ProviderConfig {
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        canonical_model: "gpt-4o".to_string(),
        api_key: Some("test-key".to_string()),
        kind: ProviderKind::OpenAIStyle,
        max_output_tokens: 0,
        uses_completion_token_field: false,
    };
    let client = reqwest::Client::new();
    let breaker = fast_breaker();

    for _ in 0..10 {
        let result = upstream::call(&client, &cfg, &breaker, &user_message(), None, None, Some(0)).await;
        let err = result.unwrap_err();
        assert_eq!(err.kind, sigorest_gateway::atoms::error::ApiErrorKind::ClientError);
    }

    assert!(breaker.admit().is_ok());
}
