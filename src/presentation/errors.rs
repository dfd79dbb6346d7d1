// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::repositories::site_host::HostError;
use crate::domain::services::llm_service::LlmError;
use crate::domain::services::site_service::SiteServiceError;

/// 应用错误类型
///
/// 携带 HTTP 状态码和返回给调用方的信息，渲染为 `{"error": ...}`
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            format!("A JSON request body is required: {}", rejection.body_text()),
        )
    }
}

impl From<SiteServiceError> for AppError {
    fn from(err: SiteServiceError) -> Self {
        let (status, message): (StatusCode, String) = err.into();
        Self::new(status, message)
    }
}

impl From<SiteServiceError> for (StatusCode, String) {
    fn from(err: SiteServiceError) -> Self {
        match err {
            SiteServiceError::ValidationError(details) => (StatusCode::BAD_REQUEST, details),
            SiteServiceError::NotConfigured(missing) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!(
                    "Service is not configured. Missing environment variables: {}",
                    missing.join(", ")
                ),
            ),
            SiteServiceError::InvalidHtml => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The AI returned invalid HTML code".to_string(),
            ),
            SiteServiceError::Llm(e) => e.into(),
            SiteServiceError::Host(e) => e.into(),
        }
    }
}

impl From<LlmError> for (StatusCode, String) {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout { .. } => (
                StatusCode::GATEWAY_TIMEOUT,
                "Timed out waiting for the AI response. Please try again.".to_string(),
            ),
            LlmError::NotConfigured => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}

impl From<HostError> for (StatusCode, String) {
    fn from(err: HostError) -> Self {
        match err {
            HostError::Unauthorized => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid GitHub token. Check the GITHUB_TOKEN variable".to_string(),
            ),
            HostError::Forbidden(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "No permission to create repositories. Check the token scope (needs 'repo')"
                    .to_string(),
            ),
            HostError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "Timed out waiting for GitHub. Please try again.".to_string(),
            ),
            HostError::Api { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("GitHub error: {}", message),
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("GitHub error: {}", other),
            ),
        }
    }
}
