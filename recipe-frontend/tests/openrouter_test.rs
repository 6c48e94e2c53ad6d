use recipe_frontend::config::OpenRouterConfig;
use recipe_frontend::services::providers::{
    CompletionParams, CompletionProvider, OpenRouterProvider, ProviderError,
};
use secrecy::Secret;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_MODEL: &str = "openai/gpt-4o-mini";

fn provider_for(server: &MockServer) -> OpenRouterProvider {
    let config = OpenRouterConfig {
        api_key: Secret::new("test-key".to_string()),
        base_url: format!("{}/", server.uri()),
        model: TEST_MODEL.to_string(),
        request_timeout_secs: 5,
    };
    OpenRouterProvider::new(&config).expect("Failed to build provider")
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "gen-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn sends_chat_completion_request_and_returns_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": TEST_MODEL,
            "messages": [{ "role": "user", "content": "Suggest something" }],
            "max_tokens": 500
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Lemon Rice")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let reply = provider
        .complete("Suggest something", &CompletionParams::default())
        .await
        .unwrap();

    assert_eq!(reply, "Lemon Rice");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let temperature = body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.4).abs() < 1e-6);
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete("hi", &CompletionParams::default())
        .await
        .unwrap_err();

    match err {
        ProviderError::ApiError(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("upstream exploded"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete("hi", &CompletionParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::RateLimited));
}

#[tokio::test]
async fn empty_choices_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete("hi", &CompletionParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}

#[tokio::test]
async fn null_content_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": null } }
            ]
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete("hi", &CompletionParams::default())
        .await
        .unwrap_err();

    match err {
        ProviderError::InvalidResponse(message) => assert!(message.contains("no content")),
        other => panic!("expected InvalidResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete("hi", &CompletionParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}

#[test]
fn empty_api_key_is_rejected() {
    let config = OpenRouterConfig {
        api_key: Secret::new(String::new()),
        base_url: "http://localhost".to_string(),
        model: TEST_MODEL.to_string(),
        request_timeout_secs: 5,
    };

    assert!(matches!(
        OpenRouterProvider::new(&config),
        Err(ProviderError::NotConfigured(_))
    ));
}
