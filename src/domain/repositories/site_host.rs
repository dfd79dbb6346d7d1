// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 站点托管错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// 令牌无效（401）
    #[error("Bad credentials")]
    Unauthorized,
    /// 令牌权限不足（403）
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// 仓库名已被占用（422）
    #[error("Repository name already exists: {0}")]
    NameTaken(String),
    /// 所有候选仓库名均已被占用
    #[error("Could not find a free repository name for '{base}' after {attempts} attempts")]
    NameExhausted { base: String, attempts: u32 },
    /// 其他 API 错误
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    /// 请求超时
    #[error("Request to hosting API timed out")]
    Timeout,
    /// 网络或解析错误
    #[error("Transport error: {0}")]
    Transport(String),
}

/// 新建仓库的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepository {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub auto_init: bool,
}

/// 已创建仓库的信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedRepository {
    /// 仓库名（托管方可能做过规整）
    pub name: String,
    /// 仓库所有者
    pub owner: String,
    /// 仓库网页地址
    pub html_url: String,
}

/// 待上传的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFile {
    pub path: String,
    pub message: String,
    /// 原始文本内容，编码由实现负责
    pub content: String,
    pub branch: String,
}

/// 站点托管特质
///
/// 定义创建仓库、上传文件和开启静态页面托管的接口，
/// 具体实现由基础设施层提供
#[async_trait]
pub trait SiteHost: Send + Sync {
    /// 创建仓库，名称冲突时返回 `HostError::NameTaken`
    async fn create_repository(&self, repo: &NewRepository) -> Result<HostedRepository, HostError>;
    /// 在仓库中创建文件
    async fn create_file(&self, repo: &HostedRepository, file: &NewFile) -> Result<(), HostError>;
    /// 为分支根目录开启静态页面托管
    async fn enable_pages(&self, repo: &HostedRepository, branch: &str) -> Result<(), HostError>;
}
