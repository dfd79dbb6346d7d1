// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 定义生成流水线中流转的数据：
/// - 站点请求（SiteRequest）：描述文本和站点名称
/// - 生成结果（GeneratedSite）：清理后的 HTML 及产出模型
/// - 发布结果（PublishedSite）：仓库地址和 Pages 地址
pub mod site;
