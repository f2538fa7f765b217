// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::{CrawlResult, JobProgress, JobState};
use crate::queue::crawl_queue::{CrawlQueue, QueueError};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// 状态查询错误类型
#[derive(Error, Debug)]
pub enum StatusError {
    /// 任务不存在
    #[error("Job not found")]
    NotFound,

    /// 队列查询失败
    #[error("Status lookup failed: {0}")]
    Lookup(#[from] QueueError),
}

/// 状态快照
///
/// 某一时刻任务的生命周期状态与进度计数。读取是单次
/// 有界查询，不与工作器同步，返回时可能已经过期。
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    /// 生命周期状态
    pub state: JobState,
    /// 进度计数
    pub progress: JobProgress,
    /// 终态结果；非终态时恒为None，绝不返回部分结果
    pub result: Option<CrawlResult>,
    /// 失败原因（如有）
    pub error: Option<String>,
}

/// 状态查询服务
///
/// 按任务ID组合队列中的状态、进度和终态结果。任务缺失
/// 是可观察的NotFound，绝不静默返回空的默认快照。
pub struct StatusQueryService {
    queue: Arc<dyn CrawlQueue>,
}

impl StatusQueryService {
    /// 创建新的状态查询服务实例
    pub fn new(queue: Arc<dyn CrawlQueue>) -> Self {
        Self { queue }
    }

    /// 查询任务状态
    ///
    /// # 参数
    ///
    /// * `job_id` - 任务ID
    ///
    /// # 返回值
    ///
    /// * `Ok(StatusSnapshot)` - 任务当前快照
    /// * `Err(StatusError::NotFound)` - 任务ID未知
    /// * `Err(StatusError::Lookup)` - 队列查询失败
    pub async fn query_status(&self, job_id: Uuid) -> Result<StatusSnapshot, StatusError> {
        let job = self
            .queue
            .get_job(job_id)
            .await?
            .ok_or(StatusError::NotFound)?;

        // The result payload is only exposed once the job is terminal.
        let result = if job.state.is_terminal() {
            job.result
        } else {
            None
        };

        Ok(StatusSnapshot {
            state: job.state,
            progress: job.progress,
            result,
            error: job.error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::crawl::{CrawlMode, CrawlSpec, Document, DocumentMetadata};
    use crate::queue::crawl_queue::WorkerQueue;
    use crate::queue::memory_queue::MemoryCrawlQueue;
    use serde_json::Map;

    fn spec() -> CrawlSpec {
        CrawlSpec {
            url: "https://example.com".to_string(),
            mode: CrawlMode::Crawl,
            crawler_options: Map::new(),
            page_options: Map::new(),
            origin: "api".to_string(),
            team_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let queue = Arc::new(MemoryCrawlQueue::new());
        let service = StatusQueryService::new(queue);
        let err = service.query_status(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StatusError::NotFound));
    }

    #[tokio::test]
    async fn test_non_terminal_snapshot_has_no_result() {
        let queue = Arc::new(MemoryCrawlQueue::new());
        let job = queue.submit(spec()).await.unwrap();
        let service = StatusQueryService::new(queue.clone());

        let snapshot = service.query_status(job.id).await.unwrap();
        assert_eq!(snapshot.state, JobState::Waiting);
        assert!(snapshot.result.is_none());
    }

    #[tokio::test]
    async fn test_terminal_snapshot_carries_result() {
        let queue = Arc::new(MemoryCrawlQueue::new());
        let job = queue.submit(spec()).await.unwrap();
        queue.claim_next().await.unwrap();
        queue
            .complete(
                job.id,
                vec![Document {
                    content: "hello".to_string(),
                    metadata: DocumentMetadata {
                        title: None,
                        source_url: "https://example.com".to_string(),
                        status_code: Some(200),
                    },
                }],
            )
            .await
            .unwrap();

        let service = StatusQueryService::new(queue);
        let first = service.query_status(job.id).await.unwrap();
        let second = service.query_status(job.id).await.unwrap();
        assert_eq!(first.state, JobState::Completed);
        assert_eq!(second.state, JobState::Completed);
        assert_eq!(first.result.as_ref().map(Vec::len), Some(1));
        assert_eq!(second.result.as_ref().map(Vec::len), Some(1));
    }
}
