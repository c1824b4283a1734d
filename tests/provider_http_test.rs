//! Integration tests for the hosted provider adapter against a mock HTTP server.

use std::time::Duration;

use git_auto_commit::config::{OpenAiSettings, ProviderKind, ProviderSettings};
use git_auto_commit::error::ProviderError;
use git_auto_commit::llm::http::azure_endpoint;
use git_auto_commit::llm::{
    AuthScheme, CommitMessageProvider, HttpProvider, VendorProfile, WireFormat,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n+pub fn hello() {}";

fn openai_profile(server: &MockServer) -> VendorProfile {
    VendorProfile {
        kind: ProviderKind::OpenAi,
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        auth: AuthScheme::Bearer("sk-test".to_string()),
        wire: WireFormat::ChatCompletions,
        model: Some("gpt-4".to_string()),
    }
}

fn claude_profile(server: &MockServer) -> VendorProfile {
    VendorProfile {
        kind: ProviderKind::Claude,
        endpoint: format!("{}/v1/messages", server.uri()),
        auth: AuthScheme::Anthropic("sk-ant-test".to_string()),
        wire: WireFormat::AnthropicMessages,
        model: Some("claude-3-5-sonnet-20241022".to_string()),
    }
}

fn chat_reply(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

async fn generate(profile: VendorProfile) -> Result<String, ProviderError> {
    let provider = HttpProvider::new(profile).expect("Failed to build provider");
    provider
        .generate_commit_message(DIFF, "", &CancellationToken::new())
        .await
}

// =============================================================================
// CHAT COMPLETIONS (OpenAI, Azure, GitHub Models)
// =============================================================================

#[tokio::test]
async fn test_openai_returns_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("feat: add hello")))
        .expect(1)
        .mount(&server)
        .await;

    let message = generate(openai_profile(&server)).await.unwrap();
    assert_eq!(message, "feat: add hello");
}

#[tokio::test]
async fn test_prompt_carries_diff_and_guidance() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("feat: x")))
        .mount(&server)
        .await;

    let provider = HttpProvider::new(openai_profile(&server)).unwrap();
    provider
        .generate_commit_message(DIFF, "Use [TICKET] prefixes", &CancellationToken::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["messages"][0]["role"], "user");
    let prompt = body["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("+pub fn hello() {}"));
    assert!(prompt.contains("Repository-specific guidelines:"));
    assert!(prompt.contains("Use [TICKET] prefixes"));
}

#[tokio::test]
async fn test_error_payload_surfaces_vendor_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": { "message": "invalid_api_key" } })),
        )
        .mount(&server)
        .await;

    let err = generate(openai_profile(&server)).await.unwrap_err();
    assert!(matches!(err, ProviderError::Api { provider: ProviderKind::OpenAi, .. }));
    assert!(err.to_string().contains("invalid_api_key"));
}

#[tokio::test]
async fn test_empty_choices_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = generate(openai_profile(&server)).await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyResponse { .. }));
    assert_eq!(err.to_string(), "No result returned from OpenAI");
}

#[tokio::test]
async fn test_blank_content_is_empty_response() {
    for content in ["", "  \n"] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(content)))
            .mount(&server)
            .await;

        let err = generate(openai_profile(&server)).await.unwrap_err();
        assert!(
            matches!(err, ProviderError::EmptyResponse { .. }),
            "content {:?} gave {:?}",
            content,
            err
        );
    }
}

#[tokio::test]
async fn test_non_json_failure_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = generate(openai_profile(&server)).await.unwrap_err();
    match err {
        ProviderError::Http { status, body, .. } => {
            assert_eq!(status, 502);
            assert_eq!(body, "Bad Gateway");
        }
        other => panic!("Expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_success_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = generate(openai_profile(&server)).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_azure_uses_deployment_url_and_api_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt4-prod/chat/completions"))
        .and(query_param("api-version", "2024-02-15-preview"))
        .and(header("api-key", "azure-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("fix: handle null")))
        .expect(1)
        .mount(&server)
        .await;

    let profile = VendorProfile {
        kind: ProviderKind::Azure,
        endpoint: azure_endpoint(&server.uri(), "gpt4-prod"),
        auth: AuthScheme::ApiKey("azure-key".to_string()),
        wire: WireFormat::ChatCompletions,
        model: None,
    };
    let message = generate(profile).await.unwrap();
    assert_eq!(message, "fix: handle null");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("model").is_none());
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_github_models_uses_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer ghp_test"))
        .and(body_partial_json(json!({ "model": "gpt-4o" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("docs: update readme")))
        .expect(1)
        .mount(&server)
        .await;

    let profile = VendorProfile {
        kind: ProviderKind::GitHub,
        endpoint: format!("{}/chat/completions", server.uri()),
        auth: AuthScheme::Bearer("ghp_test".to_string()),
        wire: WireFormat::ChatCompletions,
        model: Some("gpt-4o".to_string()),
    };
    assert_eq!(generate(profile).await.unwrap(), "docs: update readme");
}

// =============================================================================
// ANTHROPIC MESSAGES
// =============================================================================

#[tokio::test]
async fn test_claude_sends_version_header_and_max_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-5-sonnet-20241022",
            "max_tokens": 1024
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "type": "message",
            "content": [{ "type": "text", "text": "refactor: split parser" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let message = generate(claude_profile(&server)).await.unwrap();
    assert_eq!(message, "refactor: split parser");
}

#[tokio::test]
async fn test_claude_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "type": "error",
            "error": { "type": "invalid_request_error", "message": "max_tokens: too large" }
        })))
        .mount(&server)
        .await;

    let err = generate(claude_profile(&server)).await.unwrap_err();
    assert_eq!(err.to_string(), "Claude API error: max_tokens: too large");
}

#[tokio::test]
async fn test_claude_empty_content_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .mount(&server)
        .await;

    let err = generate(claude_profile(&server)).await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyResponse { provider: ProviderKind::Claude }));
}

#[tokio::test]
async fn test_claude_blank_text_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "content": [{ "type": "text", "text": "" }] })),
        )
        .mount(&server)
        .await;

    let err = generate(claude_profile(&server)).await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyResponse { provider: ProviderKind::Claude }));
}

// =============================================================================
// SETTINGS TO REQUEST
// =============================================================================

#[tokio::test]
async fn test_provider_from_settings_targets_overridden_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-from-config"))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("chore: bump deps")))
        .expect(1)
        .mount(&server)
        .await;

    let settings = ProviderSettings::OpenAi(OpenAiSettings {
        api_key: "sk-from-config".to_string(),
        model: "gpt-4o-mini".to_string(),
    });
    let provider = HttpProvider::from_settings(&settings)
        .unwrap()
        .with_endpoint(format!("{}/v1/chat/completions", server.uri()));

    let message = provider
        .generate_commit_message(DIFF, "", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(message, "chore: bump deps");
}

// =============================================================================
// CANCELLATION AND TRANSPORT
// =============================================================================

#[tokio::test]
async fn test_cancellation_aborts_in_flight_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_reply("too late"))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let provider = HttpProvider::new(openai_profile(&server)).unwrap();
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let err = provider
        .generate_commit_message(DIFF, "", &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Cancelled { .. }));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let profile = VendorProfile {
        kind: ProviderKind::OpenAi,
        // Port 9 (discard) is almost never listening locally.
        endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        auth: AuthScheme::Bearer("sk-test".to_string()),
        wire: WireFormat::ChatCompletions,
        model: Some("gpt-4".to_string()),
    };

    let err = generate(profile).await.unwrap_err();
    assert!(matches!(err, ProviderError::Transport { .. }));
}
