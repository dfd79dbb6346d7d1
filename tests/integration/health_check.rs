// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{test_settings, FakeHost, FakeLlm, PAGE};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use sitegen::domain::services::site_service::SiteService;
use sitegen::presentation::routes;
use std::sync::Arc;
use tower::util::ServiceExt;

fn app_with(settings: sitegen::config::settings::Settings) -> axum::Router {
    let settings = Arc::new(settings);
    let service = Arc::new(SiteService::new(
        Arc::new(FakeLlm::returning(PAGE)),
        Arc::new(FakeHost::default()),
        settings.clone(),
    ));
    routes::app(settings, service)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// 健康检查测试
///
/// 配置齐全时返回 healthy
#[tokio::test]
async fn health_check_reports_healthy() {
    let app = app_with(test_settings("http://127.0.0.1:9", "http://127.0.0.1:9"));

    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "sitegen");
}

/// 缺少配置时返回 503 和缺失的变量名
#[tokio::test]
async fn health_check_reports_missing_configuration() {
    let mut settings = test_settings("http://127.0.0.1:9", "http://127.0.0.1:9");
    settings.github.token = None;
    settings.llm.api_key = Some(String::new());

    let (status, body) = get_json(app_with(settings), "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(
        body["missing"],
        serde_json::json!(["GITHUB_TOKEN", "GROQ_API_KEY"])
    );
}

/// 首页返回表单
#[tokio::test]
async fn index_serves_form() {
    let app = app_with(test_settings("http://127.0.0.1:9", "http://127.0.0.1:9"));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/generate"));
}
