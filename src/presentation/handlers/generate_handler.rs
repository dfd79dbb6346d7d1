// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{rejection::JsonRejection, Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::error;

use crate::application::dto::generate_request::{GenerateRequestDto, GenerateResponseDto};
use crate::domain::services::site_service::SiteService;
use crate::presentation::errors::AppError;

/// 处理站点生成请求
///
/// # 参数
///
/// * `service` - 站点生成服务
/// * `payload` - 请求体，`{"prompt": ..., "name"?: ...}`
///
/// # 返回值
///
/// 成功时返回仓库地址、预览地址和生成的代码
///
/// # 错误
///
/// - 请求体缺失或不是 JSON、描述为空或过长：400
/// - 缺少必要配置：503
/// - 补全接口或 GitHub 超时：504
/// - 其他错误：500
pub async fn generate(
    Extension(service): Extension<Arc<SiteService>>,
    payload: Result<Json<GenerateRequestDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    match service.generate(payload).await {
        Ok(outcome) => {
            let response = GenerateResponseDto::new(outcome.site, outcome.published);
            Ok((StatusCode::OK, Json(response)))
        }
        Err(e) => {
            error!("Site generation failed: {}", e);
            Err(e.into())
        }
    }
}
