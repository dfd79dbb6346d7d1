// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::services::site_service::SiteService;
use crate::presentation::handlers::generate_handler;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 首页表单
const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// 服务名，出现在健康检查响应中
pub const SERVICE_NAME: &str = "sitegen";

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由，`Settings` 和 `SiteService` 需要由调用方以 `Extension` 注入
pub fn routes() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/generate", post(generate_handler::generate))
}

/// 创建带有共享状态和请求追踪的完整应用
pub fn app(settings: Arc<Settings>, service: Arc<SiteService>) -> Router {
    routes()
        .layer(Extension(service))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
}

/// 首页，返回静态表单
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// 健康检查端点
///
/// # 返回值
///
/// 必要配置齐全时返回 200 和 `healthy`，否则返回 503 和缺失的变量名
pub async fn health_check(Extension(settings): Extension<Arc<Settings>>) -> impl IntoResponse {
    let missing = settings.missing_required();
    if missing.is_empty() {
        (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION"),
                "missing": missing,
            })),
        )
    }
}
