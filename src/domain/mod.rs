// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：请求、生成结果和发布结果
/// - 仓库接口（repositories）：站点托管抽象接口
/// - 服务（services）：页面生成、清理、命名和发布
pub mod models;
pub mod repositories;
pub mod services;
