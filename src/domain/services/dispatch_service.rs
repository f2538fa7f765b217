// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::{CrawlJob, CrawlSpec};
use crate::queue::crawl_queue::{CrawlQueue, QueueError};
use std::sync::Arc;
use tracing::info;

/// 任务分发器
///
/// 把归一化后的爬取规格提交给外部队列协作方，换取
/// 不透明的任务ID。提交失败是基础设施错误，与校验错误
/// 严格区分：调用方可以直接重试整个请求而无需重新校验。
pub struct JobDispatcher {
    queue: Arc<dyn CrawlQueue>,
}

impl JobDispatcher {
    /// 创建新的任务分发器实例
    pub fn new(queue: Arc<dyn CrawlQueue>) -> Self {
        Self { queue }
    }

    /// 提交任务
    ///
    /// # 参数
    ///
    /// * `spec` - 归一化的爬取规格，原样携带url、mode、
    ///   crawler_options、team_id、page_options和origin
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlJob)` - 队列分配的任务
    /// * `Err(QueueError)` - 提交失败
    pub async fn submit(&self, spec: CrawlSpec) -> Result<CrawlJob, QueueError> {
        let job = self.queue.submit(spec).await?;
        info!(
            job_id = %job.id,
            team_id = %job.spec.team_id,
            url = %job.spec.url,
            mode = %job.spec.mode,
            "Crawl job dispatched"
        );
        Ok(job)
    }
}
