// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::{CrawlJob, CrawlResult, CrawlSpec, JobProgress, JobState};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// 队列错误类型
#[derive(Error, Debug)]
pub enum QueueError {
    /// 提交失败
    #[error("Job submission failed: {0}")]
    Submit(String),

    /// 查询失败
    #[error("Job lookup failed: {0}")]
    Lookup(String),
}

/// 任务快照
///
/// 从队列读出的任务瞬时视图。读取时不与工作器同步，
/// 返回时可能已经过期，这是可接受的。
#[derive(Debug, Clone)]
pub struct JobSnapshot {
    /// 任务ID
    pub id: Uuid,
    /// 提交时的请求快照
    pub spec: CrawlSpec,
    /// 生命周期状态
    pub state: JobState,
    /// 当前进度
    pub progress: JobProgress,
    /// 终态结果，非终态时为None
    pub result: Option<CrawlResult>,
    /// 失败原因（如有）
    pub error: Option<String>,
}

/// 爬取队列特质（请求侧）
///
/// 编排核心对队列的全部能力：提交任务换取不透明ID，
/// 以及按ID读取任务快照。任务的生命周期存储由队列
/// 实现方拥有，本核心只读。
#[async_trait]
pub trait CrawlQueue: Send + Sync {
    /// 提交任务
    ///
    /// # 参数
    ///
    /// * `spec` - 归一化的爬取规格
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlJob)` - 已入队的任务及其ID
    /// * `Err(QueueError)` - 提交失败（基础设施错误，可整体重试）
    async fn submit(&self, spec: CrawlSpec) -> Result<CrawlJob, QueueError>;

    /// 按ID查询任务
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(JobSnapshot))` - 任务存在
    /// * `Ok(None)` - 任务不存在，与"存在但无进度"可区分
    /// * `Err(QueueError)` - 查询失败
    async fn get_job(&self, job_id: Uuid) -> Result<Option<JobSnapshot>, QueueError>;
}

/// 爬取队列特质（工作器侧）
///
/// 工作器领取和推进任务的能力。进度和状态只经由这里
/// 变更，请求侧永远不写。
#[async_trait]
pub trait WorkerQueue: Send + Sync {
    /// 领取下一个等待中的任务并标记为活跃
    async fn claim_next(&self) -> Result<Option<CrawlJob>, QueueError>;

    /// 更新任务进度
    ///
    /// `current`的回退会被忽略，同一任务的进度单调不减。
    async fn update_progress(&self, job_id: Uuid, progress: JobProgress)
        -> Result<(), QueueError>;

    /// 以结果完成任务
    async fn complete(&self, job_id: Uuid, result: CrawlResult) -> Result<(), QueueError>;

    /// 标记任务失败
    async fn fail(&self, job_id: Uuid, error: String) -> Result<(), QueueError>;
}
