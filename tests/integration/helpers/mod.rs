// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use sitegen::config::settings::{GitHubSettings, LlmSettings, ServerSettings, Settings};
use sitegen::domain::models::site::TokenUsage;
use sitegen::domain::repositories::site_host::{
    HostError, HostedRepository, NewFile, NewRepository, SiteHost,
};
use sitegen::domain::services::llm_service::{Completion, LLMServiceTrait, LlmError};
use sitegen::domain::services::site_service::SiteService;
use sitegen::presentation::routes;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub const PAGE: &str = "<!DOCTYPE html>\n<html><head><title>Bakery</title></head><body><h1>Fresh bread</h1></body></html>";

/// 测试配置，所有必填项均已设置
pub fn test_settings(llm_base_url: &str, github_base_url: &str) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            debug: false,
        },
        llm: LlmSettings {
            api_key: Some("gsk_test".to_string()),
            api_base_url: llm_base_url.to_string(),
            models: vec!["primary-model".to_string(), "fallback-model".to_string()],
            temperature: 0.7,
            max_tokens: 8192,
            top_p: 0.95,
            timeout_secs: 2,
        },
        github: GitHubSettings {
            token: Some("ghp_test".to_string()),
            user: Some("octocat".to_string()),
            api_base_url: github_base_url.to_string(),
            branch: "main".to_string(),
            timeout_secs: 2,
            pages_timeout_secs: 2,
            max_name_attempts: 10,
        },
    }
}

/// 返回固定结果的补全服务
pub struct FakeLlm {
    result: Result<String, fn() -> LlmError>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn returning(content: &str) -> Self {
        Self {
            result: Ok(content.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(make_error: fn() -> LlmError) -> Self {
        Self {
            result: Err(make_error),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LLMServiceTrait for FakeLlm {
    async fn generate_html(&self, prompt: &str) -> Result<Completion, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.result {
            Ok(content) => Ok(Completion {
                content: content.clone(),
                model: "fake-model".to_string(),
                usage: TokenUsage::default(),
            }),
            Err(make_error) => Err(make_error()),
        }
    }
}

/// 内存中的托管实现
#[derive(Default)]
pub struct FakeHost {
    pub taken: HashSet<String>,
    pub create_error: Option<HostError>,
    pub created: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<NewFile>>,
}

#[async_trait]
impl SiteHost for FakeHost {
    async fn create_repository(&self, repo: &NewRepository) -> Result<HostedRepository, HostError> {
        self.created.lock().unwrap().push(repo.name.clone());
        if let Some(e) = &self.create_error {
            return Err(e.clone());
        }
        if self.taken.contains(&repo.name) {
            return Err(HostError::NameTaken(repo.name.clone()));
        }
        Ok(HostedRepository {
            name: repo.name.clone(),
            owner: "octocat".to_string(),
            html_url: format!("https://github.com/octocat/{}", repo.name),
        })
    }

    async fn create_file(&self, _repo: &HostedRepository, file: &NewFile) -> Result<(), HostError> {
        self.uploads.lock().unwrap().push(file.clone());
        Ok(())
    }

    async fn enable_pages(&self, _repo: &HostedRepository, _branch: &str) -> Result<(), HostError> {
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub llm: Arc<FakeLlm>,
    pub host: Arc<FakeHost>,
}

/// 使用假实现构建测试应用
pub fn create_test_app(settings: Settings, llm: FakeLlm, host: FakeHost) -> TestApp {
    let settings = Arc::new(settings);
    let llm = Arc::new(llm);
    let host = Arc::new(host);
    let service = Arc::new(SiteService::new(llm.clone(), host.clone(), settings.clone()));

    let app = routes::app(settings, service);
    let server = TestServer::new(app).unwrap();

    TestApp { server, llm, host }
}

pub fn default_test_app() -> TestApp {
    create_test_app(
        test_settings("http://127.0.0.1:9", "http://127.0.0.1:9"),
        FakeLlm::returning(PAGE),
        FakeHost::default(),
    )
}
