// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 未指定站点名称时使用的默认名称
pub const DEFAULT_SITE_NAME: &str = "my-site";

/// 站点生成请求
///
/// 经过校验和规整后的输入：描述文本和站点名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRequest {
    /// 对目标网站的自然语言描述
    pub prompt: String,
    /// 站点名称，用于生成仓库名
    pub name: String,
}

impl SiteRequest {
    /// 创建请求，去除首尾空白并为空名称填充默认值
    pub fn new(prompt: impl Into<String>, name: Option<String>) -> Self {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_NAME.to_string());

        Self {
            prompt: prompt.into().trim().to_string(),
            name,
        }
    }
}

/// 模型生成并清理后的页面
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSite {
    /// 以 `<` 开头的 HTML 文档
    pub html: String,
    /// 实际产出该页面的模型
    pub model: String,
}

/// 已发布站点的位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedSite {
    /// 仓库网页地址
    pub repo_url: String,
    /// 最终使用的仓库名（可能带有冲突后缀）
    pub repo_name: String,
    /// GitHub Pages 地址
    pub pages_url: String,
}

impl PublishedSite {
    /// 拼接 `https://<user>.github.io/<repo>/`
    pub fn pages_url_for(user: &str, repo_name: &str) -> String {
        format!("https://{}.github.io/{}/", user, repo_name)
    }
}

/// 补全接口返回的令牌用量
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
