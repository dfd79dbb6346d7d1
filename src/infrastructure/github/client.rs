// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::settings::GitHubSettings;
use crate::domain::repositories::site_host::{
    HostError, HostedRepository, NewFile, NewRepository, SiteHost,
};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub REST v3 客户端
///
/// 实现 `SiteHost`：创建仓库、通过 contents 接口上传文件、开启 Pages。
pub struct GitHubClient {
    client: Client,
    api_base_url: Url,
    token: Option<String>,
    pages_timeout: Duration,
}

impl GitHubClient {
    pub fn from_settings(settings: &GitHubSettings) -> Result<Self, HostError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| HostError::Transport(format!("failed to build HTTP client: {}", e)))?;

        let api_base_url = Url::parse(&settings.api_base_url).map_err(|e| {
            HostError::Transport(format!("invalid GitHub API URL '{}': {}", settings.api_base_url, e))
        })?;

        Ok(Self {
            client,
            api_base_url,
            token: settings.token.clone().filter(|t| !t.trim().is_empty()),
            pages_timeout: Duration::from_secs(settings.pages_timeout_secs),
        })
    }

    /// 拼接接口地址，每个片段都会做百分号编码
    fn endpoint(&self, segments: &[&str]) -> Result<Url, HostError> {
        let mut url = self.api_base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HostError::Transport("GitHub API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, HostError> {
        self.authorized(request).send().await.map_err(map_transport)
    }
}

#[async_trait]
impl SiteHost for GitHubClient {
    async fn create_repository(&self, repo: &NewRepository) -> Result<HostedRepository, HostError> {
        let url = self.endpoint(&["user", "repos"])?;
        debug!(name = %repo.name, "Creating repository");

        let body = CreateRepoRequest {
            name: &repo.name,
            description: &repo.description,
            private: repo.private,
            auto_init: repo.auto_init,
        };
        let response = self.send(self.client.post(url).json(&body)).await?;

        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(HostError::NameTaken(repo.name.clone()));
        }
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        let created: RepoResponse = response
            .json()
            .await
            .map_err(|e| HostError::Transport(format!("failed to parse repository: {}", e)))?;

        Ok(HostedRepository {
            name: created.name,
            owner: created.owner.login,
            html_url: created.html_url,
        })
    }

    async fn create_file(&self, repo: &HostedRepository, file: &NewFile) -> Result<(), HostError> {
        let mut segments = vec!["repos", repo.owner.as_str(), repo.name.as_str(), "contents"];
        segments.extend(file.path.split('/').filter(|s| !s.is_empty()));
        let url = self.endpoint(&segments)?;
        debug!(repo = %repo.name, path = %file.path, "Uploading file");

        let body = json!({
            "message": file.message,
            "content": STANDARD.encode(file.content.as_bytes()),
            "branch": file.branch,
        });
        let response = self.send(self.client.put(url).json(&body)).await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn enable_pages(&self, repo: &HostedRepository, branch: &str) -> Result<(), HostError> {
        let url = self.endpoint(&["repos", repo.owner.as_str(), repo.name.as_str(), "pages"])?;
        debug!(repo = %repo.name, branch, "Enabling Pages");

        let body = json!({ "source": { "branch": branch, "path": "/" } });
        let response = self
            .send(self.client.post(url).timeout(self.pages_timeout).json(&body))
            .await?;

        // 409: Pages already enabled
        if response.status().is_success() || response.status() == StatusCode::CONFLICT {
            return Ok(());
        }
        Err(error_from_response(response).await)
    }
}

fn map_transport(e: reqwest::Error) -> HostError {
    if e.is_timeout() {
        HostError::Timeout
    } else {
        HostError::Transport(e.to_string())
    }
}

/// 将错误响应转换为 `HostError`，优先使用 GitHub 返回的 `message`
async fn error_from_response(response: Response) -> HostError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GitHubErrorBody>(&text)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                text
            }
        });

    match status {
        StatusCode::UNAUTHORIZED => HostError::Unauthorized,
        StatusCode::FORBIDDEN => HostError::Forbidden(message),
        _ => HostError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[derive(Debug, Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
    auto_init: bool,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    name: String,
    html_url: String,
    owner: Owner,
}

#[derive(Debug, Deserialize)]
struct Owner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: Option<String>,
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
