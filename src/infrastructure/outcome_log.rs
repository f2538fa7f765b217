// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::CrawlOutcome;
use crate::domain::repositories::outcome_repository::OutcomeLogger;
use async_trait::async_trait;
use tracing::info;

/// 基于tracing的结果日志实现
///
/// 把每个请求终局作为结构化日志事件发出。持久化由日志
/// 管道负责，不在编排核心内。
pub struct TracingOutcomeLogger;

#[async_trait]
impl OutcomeLogger for TracingOutcomeLogger {
    async fn log_outcome(&self, outcome: &CrawlOutcome) {
        info!(
            success = outcome.success,
            message = outcome.message.as_deref().unwrap_or(""),
            num_docs = outcome.num_docs,
            time_taken = outcome.time_taken,
            team_id = %outcome.team_id,
            mode = %outcome.mode,
            url = %outcome.url,
            origin = %outcome.origin,
            "Crawl outcome"
        );
    }
}
