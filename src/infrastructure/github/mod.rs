// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// GitHub 集成
///
/// 基于 REST v3 接口实现站点托管
pub mod client;
