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

use crawlgate::application::use_cases::crawl_use_case::CrawlOrchestrator;
use crawlgate::config::settings::Settings;
use crawlgate::domain::services::dispatch_service::JobDispatcher;
use crawlgate::domain::services::status_service::StatusQueryService;
use crawlgate::engines::http_engine::HttpFetchEngine;
use crawlgate::infrastructure::credits::InMemoryCreditLedger;
use crawlgate::infrastructure::outcome_log::TracingOutcomeLogger;
use crawlgate::presentation::middleware::auth_middleware::AuthState;
use crawlgate::presentation::routes;
use crawlgate::queue::memory_queue::MemoryCrawlQueue;
use crawlgate::utils::telemetry;
use crawlgate::workers::crawl_worker::CrawlWorker;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting crawlgate...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    if settings.auth.api_keys.is_empty() {
        warn!("No API keys configured; all protected requests will be rejected");
    }

    // 3. Initialize components
    let queue = Arc::new(MemoryCrawlQueue::new());
    let inline_timeout = Duration::from_secs(settings.crawl.inline_timeout_secs);
    let engine = Arc::new(HttpFetchEngine::new(inline_timeout)?);
    let credits = Arc::new(InMemoryCreditLedger::new(settings.credits.default_balance));

    let orchestrator = Arc::new(CrawlOrchestrator::new(
        JobDispatcher::new(queue.clone()),
        engine.clone(),
        credits,
        Arc::new(TracingOutcomeLogger),
        inline_timeout,
        settings.crawl.request_cost,
    ));
    let status_service = Arc::new(StatusQueryService::new(queue.clone()));

    // 4. Start the crawl worker
    let worker = CrawlWorker::new(
        queue.clone(),
        engine,
        Duration::from_millis(settings.worker.poll_interval_ms),
        settings.worker.default_page_limit,
    );
    tokio::spawn(async move {
        worker.run().await;
    });

    // 5. Start HTTP server
    let auth_state = AuthState {
        api_keys: Arc::new(settings.auth.api_keys.clone()),
    };
    let app = routes::routes(orchestrator, status_service, auth_state)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
