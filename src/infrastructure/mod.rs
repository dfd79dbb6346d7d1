// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统与外部服务交互的技术实现：
/// - GitHub（github）：站点托管接口的 REST 实现
///
/// 基础设施层遵循依赖倒置原则，依赖于领域层的抽象接口，
/// 确保领域层保持纯粹的业务逻辑，不受技术实现的影响。
pub mod github;
