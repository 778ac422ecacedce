//! End-to-end tests against a stubbed OpenAI API

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use chatbridge_llm::{openai::OpenAiService, LlmConfig, ModelGateway};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{message_request, parse_body, TestApp};

fn app_for(server: &MockServer) -> TestApp {
    let service = Arc::new(
        OpenAiService::new(LlmConfig {
            api_key: "sk-test".to_string(),
            base_url: Some(server.uri()),
            timeout: Duration::from_secs(5),
            ..LlmConfig::default()
        })
        .unwrap(),
    );
    TestApp::with_gateway(ModelGateway {
        llm: service.clone(),
        images: service,
    })
}

#[tokio::test]
async fn test_chat_round_trip_through_openai() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [{"role": "user", "content": "hello there"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o",
            "choices": [{
                "message": {"role": "assistant", "content": "General Kenobi"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 3, "completion_tokens": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let cookie = app.login("user-1").await;

    let response = app
        .send(message_request("/chat", Some(&cookie), "hello there"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await, json!({"reply": "General Kenobi"}));
}

#[tokio::test]
async fn test_image_round_trip_through_openai() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(body_partial_json(json!({
            "prompt": "draw a cat",
            "n": 1,
            "size": "1024x1024"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": "https://x/y.png"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let cookie = app.login("user-1").await;

    let response = app
        .send(message_request("/chat", Some(&cookie), "draw a cat"))
        .await;
    assert_eq!(
        parse_body(response).await,
        json!({"reply": "이미지를 생성했습니다:", "image_url": "https://x/y.png"})
    );
}

#[tokio::test]
async fn test_openai_error_text_becomes_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let cookie = app.login("user-1").await;

    let response = app
        .send(message_request("/chat", Some(&cookie), "hello there"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    let reply = body["reply"].as_str().unwrap();
    assert!(reply.starts_with("Error: "));
    assert!(reply.contains("Incorrect API key provided"));
    assert_eq!(app.state.store.history("user-1").await.len(), 2);
}
