// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层依赖的外部托管抽象，具体实现由基础设施层提供：
/// - 站点托管（site_host）：创建代码仓库、上传页面、开启静态页面托管
pub mod site_host;
