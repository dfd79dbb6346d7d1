// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::settings::LlmSettings;
use crate::domain::models::site::TokenUsage;
use crate::domain::services::prompts::{user_message, SYSTEM_PROMPT};

/// 错误响应体在日志和错误信息中保留的最大长度
const MAX_ERROR_BODY_LEN: usize = 500;
const UNREADABLE_BODY: &str = "<unreadable body>";

/// 单个模型的失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFailure {
    pub model: String,
    pub status: u16,
    pub message: String,
}

/// LLM 服务错误类型
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM API key not configured")]
    NotConfigured,
    #[error("No LLM models configured")]
    NoModels,
    #[error("LLM request timed out (model {model})")]
    Timeout { model: String },
    #[error("Failed to send request to LLM API: {0}")]
    Request(String),
    #[error("{0}")]
    Status(ModelFailure),
    #[error("All {} LLM models failed; last error: {}", .attempts.len(), describe_last(.attempts))]
    AllModelsFailed { attempts: Vec<ModelFailure> },
    #[error("Invalid response format from LLM API: {0}")]
    InvalidResponse(String),
}

impl fmt::Display for ModelFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model {} returned {}: {}", self.model, self.status, self.message)
    }
}

fn describe_last(attempts: &[ModelFailure]) -> String {
    attempts
        .last()
        .map(|f| f.to_string())
        .unwrap_or_else(|| "none".to_string())
}

/// 一次成功的补全
#[derive(Debug, Clone)]
pub struct Completion {
    /// 第一个选项的消息文本（未清理）
    pub content: String,
    /// 产出该文本的模型
    pub model: String,
    pub usage: TokenUsage,
}

#[async_trait]
pub trait LLMServiceTrait: Send + Sync {
    /// 根据描述生成页面代码
    async fn generate_html(&self, prompt: &str) -> Result<Completion, LlmError>;
}

/// LLM服务 - 处理与 OpenAI 兼容补全接口的交互
///
/// # 功能
///
/// 按配置顺序依次尝试模型列表：某个模型返回非 2xx 状态时换下一个，
/// 超时或网络错误则立即失败。
///
/// # 配置
///
/// 来自 `[llm]` 配置段：
/// - `api_key` - API 密钥（`GROQ_API_KEY`）
/// - `api_base_url` - 接口基础 URL
/// - `models` - 按顺序尝试的模型列表
pub struct LLMService {
    client: Client,
    api_key: Option<String>,
    api_base_url: String,
    models: Vec<String>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[async_trait]
impl LLMServiceTrait for LLMService {
    async fn generate_html(&self, prompt: &str) -> Result<Completion, LlmError> {
        LLMService::generate_html(self, prompt).await
    }
}

impl LLMService {
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::Request(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            models: settings.models.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            top_p: settings.top_p,
        })
    }

    /// 模型列表
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// 使用LLM生成页面代码
    ///
    /// # 参数
    /// * `prompt` - 对网站的自然语言描述
    ///
    /// # 返回值
    /// * `Result<Completion, LlmError>` - 第一个成功模型的输出
    ///
    /// # 错误
    /// * 当API密钥未配置时返回 `NotConfigured`
    /// * 当请求超时时返回 `Timeout`
    /// * 当所有模型都返回错误状态时返回 `AllModelsFailed`
    pub async fn generate_html(&self, prompt: &str) -> Result<Completion, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;
        if self.models.is_empty() {
            return Err(LlmError::NoModels);
        }

        let messages = vec![
            Message {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            Message {
                role: "user",
                content: user_message(prompt),
            },
        ];

        let mut attempts = Vec::new();
        for model in &self.models {
            match self.complete(api_key, model, &messages).await {
                Ok(completion) => {
                    info!(
                        model = %completion.model,
                        fallbacks = attempts.len(),
                        total_tokens = completion.usage.total_tokens,
                        "LLM completion succeeded"
                    );
                    return Ok(completion);
                }
                Err(LlmError::Status(failure)) => {
                    warn!(
                        model = %failure.model,
                        status = failure.status,
                        "LLM model failed, trying next model"
                    );
                    attempts.push(failure);
                }
                Err(e) => return Err(e),
            }
        }

        Err(LlmError::AllModelsFailed { attempts })
    }

    async fn complete(
        &self,
        api_key: &str,
        model: &str,
        messages: &[Message],
    ) -> Result<Completion, LlmError> {
        let request_body = ChatCompletionRequest {
            model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
        };

        debug!(model = %model, "sending LLM request");

        let url = format!("{}/chat/completions", self.api_base_url);
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| transport_error(model, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await;
            if let Err(e) = &body {
                debug!(model = %model, error = %e, "failed to read LLM error body");
            }
            return Err(LlmError::Status(ModelFailure {
                model: model.to_string(),
                status: status.as_u16(),
                message: error_body_message(body),
            }));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout {
                    model: model.to_string(),
                }
            } else {
                LlmError::InvalidResponse(e.to_string())
            }
        })?;

        let usage = body
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                LlmError::InvalidResponse("empty or missing content in first choice".into())
            })?;

        Ok(Completion {
            content,
            model: model.to_string(),
            usage,
        })
    }
}

fn transport_error(model: &str, e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout {
            model: model.to_string(),
        }
    } else {
        LlmError::Request(e.to_string())
    }
}

/// 错误响应体读取失败时使用占位文本
fn error_body_message<E>(body: Result<String, E>) -> String {
    match body {
        Ok(text) => truncate(&text, MAX_ERROR_BODY_LEN),
        Err(_) => UNREADABLE_BODY.to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

// Wire types

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<UsageData>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageData {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}
