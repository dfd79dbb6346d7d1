// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::models::site::{GeneratedSite, PublishedSite, SiteRequest};

/// 描述文本的最大字符数
pub const MAX_PROMPT_CHARS: usize = 2000;

/// 站点生成请求数据传输对象
#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
pub struct GenerateRequestDto {
    /// 对网站的自然语言描述
    #[serde(default)]
    #[validate(custom(function = "validate_prompt"))]
    pub prompt: String,
    /// 站点名称，缺省为 `my-site`
    #[serde(default)]
    #[validate(length(max = 100, message = "Field 'name' is too long (max 100 characters)"))]
    pub name: Option<String>,
}

fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("prompt_empty").with_message(Cow::Borrowed(
            "Field 'prompt' is required and cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_PROMPT_CHARS {
        return Err(ValidationError::new("prompt_too_long").with_message(Cow::Owned(format!(
            "Prompt is too long (max {} characters)",
            MAX_PROMPT_CHARS
        ))));
    }
    Ok(())
}

/// 取第一条可读的校验错误信息
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| errors.to_string())
}

impl From<GenerateRequestDto> for SiteRequest {
    fn from(dto: GenerateRequestDto) -> Self {
        SiteRequest::new(dto.prompt, dto.name)
    }
}

/// 站点生成响应数据传输对象
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateResponseDto {
    pub success: bool,
    pub message: String,
    /// 仓库地址
    pub repo: String,
    /// Pages 预览地址
    pub preview: String,
    pub repo_name: String,
    /// 生成的 HTML，供前端 iframe 本地预览
    pub code: String,
    pub model: String,
}

impl GenerateResponseDto {
    pub fn new(site: GeneratedSite, published: PublishedSite) -> Self {
        Self {
            success: true,
            message: "Site created successfully!".to_string(),
            repo: published.repo_url,
            preview: published.pages_url,
            repo_name: published.repo_name,
            code: site.html,
            model: site.model,
        }
    }
}
