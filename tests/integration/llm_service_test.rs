// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{test_settings, PAGE};
use serde_json::{json, Value};
use sitegen::config::settings::LlmSettings;
use sitegen::domain::services::llm_service::{LLMService, LlmError};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn llm_settings(base_url: &str) -> LlmSettings {
    test_settings(base_url, "http://127.0.0.1:9").llm
}

fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 900, "total_tokens": 1020 }
    })
}

#[tokio::test]
async fn test_first_model_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .and(body_string_contains("\"model\":\"primary-model\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(PAGE)))
        .expect(1)
        .mount(&server)
        .await;

    let service = LLMService::from_settings(&llm_settings(&server.uri())).unwrap();
    let completion = service.generate_html("a bakery").await.unwrap();

    assert_eq!(completion.content, PAGE);
    assert_eq!(completion.model, "primary-model");
    assert_eq!(completion.usage.total_tokens, 1020);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "Create a website: a bakery");
    assert_eq!(body["max_tokens"], 8192);
}

#[tokio::test]
async fn test_falls_back_to_next_model_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("\"model\":\"primary-model\""))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "message": "The model has been decommissioned" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("\"model\":\"fallback-model\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(PAGE)))
        .expect(1)
        .mount(&server)
        .await;

    let service = LLMService::from_settings(&llm_settings(&server.uri())).unwrap();
    let completion = service.generate_html("a bakery").await.unwrap();

    assert_eq!(completion.model, "fallback-model");
}

#[tokio::test]
async fn test_all_models_failing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
        .expect(2)
        .mount(&server)
        .await;

    let service = LLMService::from_settings(&llm_settings(&server.uri())).unwrap();
    let err = service.generate_html("a bakery").await.unwrap_err();

    match err {
        LlmError::AllModelsFailed { attempts } => {
            assert_eq!(attempts.len(), 2);
            assert_eq!(attempts[0].model, "primary-model");
            assert_eq!(attempts[1].model, "fallback-model");
            assert_eq!(attempts[1].status, 503);
            assert_eq!(attempts[1].message, "over capacity");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_does_not_fall_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body(PAGE))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut settings = llm_settings(&server.uri());
    settings.timeout_secs = 1;
    let service = LLMService::from_settings(&settings).unwrap();
    let err = service.generate_html("a bakery").await.unwrap_err();

    assert!(matches!(err, LlmError::Timeout { ref model } if model == "primary-model"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_content_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let service = LLMService::from_settings(&llm_settings(&server.uri())).unwrap();
    let err = service.generate_html("a bakery").await.unwrap_err();

    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_missing_api_key() {
    let mut settings = llm_settings("http://127.0.0.1:9");
    settings.api_key = None;
    let service = LLMService::from_settings(&settings).unwrap();

    let err = service.generate_html("a bakery").await.unwrap_err();
    assert!(matches!(err, LlmError::NotConfigured));
}
