// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务：
/// - 页面清理（html_cleaner）：去除代码围栏和模型附带的说明文字
/// - LLM服务（llm_service）：调用补全接口，按模型列表依次回退
/// - 提示词（prompts）：系统提示词和用户消息模板
/// - 发布服务（publish_service）：创建仓库、上传页面、开启 Pages
/// - 仓库命名（repo_name）：仓库名规整和冲突后缀
/// - 站点服务（site_service）：串联完整的生成流程
pub mod html_cleaner;
pub mod llm_service;
pub mod prompts;
pub mod publish_service;
pub mod repo_name;
pub mod site_service;
