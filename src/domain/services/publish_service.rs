// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::settings::GitHubSettings;
use crate::domain::models::site::PublishedSite;
use crate::domain::repositories::site_host::{
    HostError, HostedRepository, NewFile, NewRepository, SiteHost,
};
use crate::domain::services::repo_name::{base_repo_name, random_suffix, with_suffix};

/// 页面文件名
pub const INDEX_FILE: &str = "index.html";

/// 冲突后缀来源
pub type SuffixSource = Arc<dyn Fn() -> u16 + Send + Sync>;

/// 发布服务
///
/// 负责把生成的页面发布到托管平台：
/// 1. 创建仓库，名称冲突时追加随机后缀重试
/// 2. 上传 `index.html`
/// 3. 尝试开启静态页面托管（失败只记录警告）
pub struct PublishService {
    host: Arc<dyn SiteHost>,
    pages_user: String,
    branch: String,
    max_name_attempts: u32,
    suffix_source: SuffixSource,
}

impl PublishService {
    pub fn new(host: Arc<dyn SiteHost>, settings: &GitHubSettings) -> Self {
        Self {
            host,
            pages_user: settings.user.clone().unwrap_or_default(),
            branch: settings.branch.clone(),
            max_name_attempts: settings.max_name_attempts.max(1),
            suffix_source: Arc::new(random_suffix),
        }
    }

    /// 替换冲突后缀来源（测试中使用固定序列）
    pub fn with_suffix_source(mut self, source: SuffixSource) -> Self {
        self.suffix_source = source;
        self
    }

    /// 创建名称唯一的仓库
    ///
    /// 先尝试 `site-<name>`，冲突时改用 `site-<name>-NNNN`，
    /// 最多尝试 `max_name_attempts` 次。其他错误立即返回。
    pub async fn create_unique_repo(&self, site_name: &str) -> Result<HostedRepository, HostError> {
        let base = base_repo_name(site_name);
        let mut candidate = base.clone();

        for attempt in 1..=self.max_name_attempts {
            let request = NewRepository {
                name: candidate.clone(),
                description: format!("AI-generated website: {}", site_name),
                private: false,
                auto_init: false,
            };

            match self.host.create_repository(&request).await {
                Ok(repo) => {
                    info!(repo = %repo.name, attempt, "Repository created");
                    return Ok(repo);
                }
                Err(HostError::NameTaken(_)) => {
                    warn!(name = %candidate, attempt, "Repository name taken");
                    candidate = with_suffix(&base, (self.suffix_source)());
                }
                Err(e) => return Err(e),
            }
        }

        Err(HostError::NameExhausted {
            base,
            attempts: self.max_name_attempts,
        })
    }

    /// 发布页面并返回地址
    pub async fn publish(&self, site_name: &str, html: &str) -> Result<PublishedSite, HostError> {
        let repo = self.create_unique_repo(site_name).await?;

        let file = NewFile {
            path: INDEX_FILE.to_string(),
            message: format!("AI generated: {}", site_name),
            content: html.to_string(),
            branch: self.branch.clone(),
        };
        self.host.create_file(&repo, &file).await?;
        info!(repo = %repo.name, bytes = html.len(), "Uploaded {}", INDEX_FILE);

        // Pages may need to be enabled manually in the repository settings
        if let Err(e) = self.host.enable_pages(&repo, &self.branch).await {
            warn!(repo = %repo.name, error = %e, "Could not enable Pages");
        }

        Ok(PublishedSite {
            pages_url: PublishedSite::pages_url_for(&self.pages_user, &repo.name),
            repo_url: repo.html_url,
            repo_name: repo.name,
        })
    }
}

#[cfg(test)]
#[path = "publish_service_test.rs"]
mod tests;
