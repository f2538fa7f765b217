// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::CrawlOutcome;
use async_trait::async_trait;

/// 结果日志特质
///
/// 记录每个请求终局的协作方边界。调用方以"发射后不管"
/// 的方式使用：记录失败绝不影响HTTP响应。
#[async_trait]
pub trait OutcomeLogger: Send + Sync {
    /// 记录一次请求终局
    async fn log_outcome(&self, outcome: &CrawlOutcome);
}
