// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};
use validator::Validate;

use crate::application::dto::generate_request::{first_validation_message, GenerateRequestDto};
use crate::config::settings::Settings;
use crate::domain::models::site::{GeneratedSite, PublishedSite, SiteRequest};
use crate::domain::repositories::site_host::{HostError, SiteHost};
use crate::domain::services::html_cleaner::{clean_html_code, looks_like_html};
use crate::domain::services::llm_service::{LLMServiceTrait, LlmError};
use crate::domain::services::publish_service::PublishService;

#[derive(Error, Debug)]
pub enum SiteServiceError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Service is not configured, missing: {}", .0.join(", "))]
    NotConfigured(Vec<&'static str>),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("The AI returned invalid HTML code")]
    InvalidHtml,
    #[error("Hosting error: {0}")]
    Host(#[from] HostError),
}

/// 生成并发布后的结果
#[derive(Debug, Clone)]
pub struct SiteOutcome {
    pub site: GeneratedSite,
    pub published: PublishedSite,
}

/// 站点生成服务
///
/// 串联整个流程：校验输入、调用补全接口、清理页面代码、发布到托管平台。
/// 发布失败时生成的页面直接丢弃。
pub struct SiteService {
    llm: Arc<dyn LLMServiceTrait>,
    publisher: PublishService,
    settings: Arc<Settings>,
}

impl SiteService {
    pub fn new(
        llm: Arc<dyn LLMServiceTrait>,
        host: Arc<dyn SiteHost>,
        settings: Arc<Settings>,
    ) -> Self {
        let publisher = PublishService::new(host, &settings.github);
        Self {
            llm,
            publisher,
            settings,
        }
    }

    /// 处理一次生成请求
    pub async fn generate(&self, dto: GenerateRequestDto) -> Result<SiteOutcome, SiteServiceError> {
        dto.validate()
            .map_err(|e| SiteServiceError::ValidationError(first_validation_message(&e)))?;

        let missing = self.settings.missing_required();
        if !missing.is_empty() {
            return Err(SiteServiceError::NotConfigured(missing));
        }

        self.run(SiteRequest::from(dto)).await
    }

    #[instrument(skip(self, request), fields(site = %request.name))]
    async fn run(&self, request: SiteRequest) -> Result<SiteOutcome, SiteServiceError> {
        info!(prompt_chars = request.prompt.chars().count(), "New site request");

        // Step 1: generate
        info!("Generating HTML");
        let completion = self.llm.generate_html(&request.prompt).await?;
        let html = clean_html_code(&completion.content);
        if !looks_like_html(&html) {
            return Err(SiteServiceError::InvalidHtml);
        }
        let site = GeneratedSite {
            html,
            model: completion.model,
        };

        // Step 2: publish
        info!("Publishing to GitHub");
        let published = self.publisher.publish(&request.name, &site.html).await?;
        info!(repo = %published.repo_url, preview = %published.pages_url, "Site published");

        Ok(SiteOutcome { site, published })
    }
}
