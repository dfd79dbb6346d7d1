// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use sitegen::config::settings::Settings;
use sitegen::domain::services::llm_service::LLMService;
use sitegen::domain::services::site_service::SiteService;
use sitegen::infrastructure::github::client::GitHubClient;
use sitegen::presentation::routes;
use sitegen::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load .env (local development) and configuration
    let _ = dotenvy::dotenv();
    let settings = Arc::new(Settings::new()?);

    // 2. Initialize logging
    telemetry::init_telemetry(settings.server.debug);
    info!("Starting sitegen...");

    if settings.is_configured() {
        info!("Configuration loaded");
    } else {
        warn!(
            missing = ?settings.missing_required(),
            "Required configuration is missing, /generate will answer 503"
        );
    }

    // 3. Initialize services
    let llm = Arc::new(LLMService::from_settings(&settings.llm)?);
    info!(models = ?llm.models(), "LLM service initialized");
    let host = Arc::new(GitHubClient::from_settings(&settings.github)?);
    let service = Arc::new(SiteService::new(llm, host, settings.clone()));

    // 4. Start HTTP server
    let app = routes::app(settings.clone(), service);
    let addr = settings.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(debug = settings.server.debug, "Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
