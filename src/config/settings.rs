// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;
use std::path::Path;

/// 必填的环境变量名
pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const GITHUB_USER: &str = "GITHUB_USER";

/// 应用程序配置设置
///
/// 包含服务器、LLM 补全接口和 GitHub 发布等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// LLM 配置
    pub llm: LlmSettings,
    /// GitHub 配置
    pub github: GitHubSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 调试模式（更详细的日志）
    pub debug: bool,
}

/// LLM 补全接口配置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// API 密钥
    pub api_key: Option<String>,
    /// OpenAI 兼容接口的基础 URL
    pub api_base_url: String,
    /// 按顺序尝试的模型列表
    pub models: Vec<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// GitHub 配置
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubSettings {
    /// 访问令牌（需要 `repo` 权限）
    pub token: Option<String>,
    /// 仓库所属用户名，用于拼接 Pages 地址
    pub user: Option<String>,
    /// REST API 基础 URL
    pub api_base_url: String,
    /// 发布分支
    pub branch: String,
    /// 普通 API 调用超时时间（秒）
    pub timeout_secs: u64,
    /// 启用 Pages 调用的超时时间（秒）
    pub pages_timeout_secs: u64,
    /// 仓库名冲突时的最大创建尝试次数
    pub max_name_attempts: u32,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从 `config/` 目录和进程环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let vars: Map<String, String> = std::env::vars().collect();
        Self::load(Path::new("config"), &env, vars)
    }

    /// 从指定目录和变量表加载配置
    ///
    /// 优先级从低到高：内置默认值、`<dir>/default.*`、`<dir>/<environment>.*`、
    /// `SITEGEN__SECTION__KEY` 变量，最后是 `GROQ_API_KEY`、`GITHUB_TOKEN`、
    /// `GITHUB_USER`、`PORT`、`FLASK_DEBUG`/`DEBUG` 这些常用变量。
    pub fn load(
        config_dir: &Path,
        environment: &str,
        vars: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let plain = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let debug = plain("FLASK_DEBUG")
            .or_else(|| plain("DEBUG"))
            .map(|v| v.eq_ignore_ascii_case("true"));

        let builder = Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.debug", false)?
            // LLM defaults
            .set_default("llm.api_base_url", "https://api.groq.com/openai/v1")?
            .set_default(
                "llm.models",
                vec![
                    "llama-3.3-70b-versatile",
                    "llama-3.1-8b-instant",
                    "llama3-70b-8192",
                ],
            )?
            .set_default("llm.temperature", 0.7)?
            .set_default("llm.max_tokens", 8192)?
            .set_default("llm.top_p", 0.95)?
            .set_default("llm.timeout_secs", 60)?
            // GitHub defaults
            .set_default("github.api_base_url", "https://api.github.com")?
            .set_default("github.branch", "main")?
            .set_default("github.timeout_secs", 30)?
            .set_default("github.pages_timeout_secs", 30)?
            .set_default("github.max_name_attempts", 10)?
            .add_source(File::with_name(&config_dir.join("default").to_string_lossy()).required(false))
            .add_source(
                File::with_name(&config_dir.join(environment).to_string_lossy()).required(false),
            )
            .add_source(
                Environment::with_prefix("SITEGEN")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("llm.models")
                    .source(Some(vars.clone())),
            )
            .set_override_option("llm.api_key", plain(GROQ_API_KEY))?
            .set_override_option("github.token", plain(GITHUB_TOKEN))?
            .set_override_option("github.user", plain(GITHUB_USER))?
            .set_override_option("server.port", plain("PORT"))?
            .set_override_option("server.debug", debug)?;

        builder.build()?.try_deserialize()
    }

    /// 列出缺失的必填配置（以环境变量名表示）
    pub fn missing_required(&self) -> Vec<&'static str> {
        let is_blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());

        let mut missing = Vec::new();
        if is_blank(&self.github.token) {
            missing.push(GITHUB_TOKEN);
        }
        if is_blank(&self.llm.api_key) {
            missing.push(GROQ_API_KEY);
        }
        if is_blank(&self.github.user) {
            missing.push(GITHUB_USER);
        }
        missing
    }

    /// 所有必填配置是否齐全
    pub fn is_configured(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// 监听地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
