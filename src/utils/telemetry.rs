// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 未设置时使用的过滤规则
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug,sitegen=debug,hyper=info,reqwest=info"
    } else {
        "info,sitegen=info"
    }
}

/// 初始化日志
///
/// `LOG_FORMAT=json` 时输出 JSON 行，否则输出可读文本
pub fn init_telemetry(debug: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(debug).into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
