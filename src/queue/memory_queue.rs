// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::{CrawlJob, CrawlResult, CrawlSpec, JobProgress, JobState};
use crate::queue::crawl_queue::{CrawlQueue, JobSnapshot, QueueError, WorkerQueue};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

/// 队列中一个任务的存储条目
#[derive(Debug, Clone)]
struct JobEntry {
    spec: CrawlSpec,
    state: JobState,
    progress: JobProgress,
    result: Option<CrawlResult>,
    error: Option<String>,
}

/// 内存爬取队列
///
/// 基于DashMap的进程内队列实现，提供与外部队列相同的
/// 提交/查询/推进边界。任务按FIFO顺序被工作器领取；
/// 终态一旦写入即不再变化。
pub struct MemoryCrawlQueue {
    jobs: DashMap<Uuid, JobEntry>,
    pending: Mutex<VecDeque<Uuid>>,
}

impl MemoryCrawlQueue {
    /// 创建新的内存队列实例
    pub fn new() -> Self {
        Self {
            jobs: DashMap::new(),
            pending: Mutex::new(VecDeque::new()),
        }
    }
}

impl Default for MemoryCrawlQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CrawlQueue for MemoryCrawlQueue {
    async fn submit(&self, spec: CrawlSpec) -> Result<CrawlJob, QueueError> {
        let id = Uuid::new_v4();
        self.jobs.insert(
            id,
            JobEntry {
                spec: spec.clone(),
                state: JobState::Waiting,
                progress: JobProgress::default(),
                result: None,
                error: None,
            },
        );
        self.pending
            .lock()
            .map_err(|e| QueueError::Submit(e.to_string()))?
            .push_back(id);
        Ok(CrawlJob { id, spec })
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<JobSnapshot>, QueueError> {
        Ok(self.jobs.get(&job_id).map(|entry| JobSnapshot {
            id: job_id,
            spec: entry.spec.clone(),
            state: entry.state,
            progress: entry.progress.clone(),
            result: entry.result.clone(),
            error: entry.error.clone(),
        }))
    }
}

#[async_trait]
impl WorkerQueue for MemoryCrawlQueue {
    async fn claim_next(&self) -> Result<Option<CrawlJob>, QueueError> {
        let next_id = {
            let mut pending = self
                .pending
                .lock()
                .map_err(|e| QueueError::Lookup(e.to_string()))?;
            pending.pop_front()
        };

        let Some(id) = next_id else {
            return Ok(None);
        };

        match self.jobs.get_mut(&id) {
            Some(mut entry) if entry.state == JobState::Waiting => {
                entry.state = JobState::Active;
                Ok(Some(CrawlJob {
                    id,
                    spec: entry.spec.clone(),
                }))
            }
            // Entry vanished or was already moved on; skip it.
            _ => Ok(None),
        }
    }

    async fn update_progress(
        &self,
        job_id: Uuid,
        progress: JobProgress,
    ) -> Result<(), QueueError> {
        let Some(mut entry) = self.jobs.get_mut(&job_id) else {
            return Err(QueueError::Lookup(format!("unknown job {job_id}")));
        };
        if entry.state.is_terminal() {
            return Ok(());
        }
        // current is monotonically non-decreasing for a given job id
        if progress.current < entry.progress.current {
            return Ok(());
        }
        entry.progress = progress;
        Ok(())
    }

    async fn complete(&self, job_id: Uuid, result: CrawlResult) -> Result<(), QueueError> {
        let Some(mut entry) = self.jobs.get_mut(&job_id) else {
            return Err(QueueError::Lookup(format!("unknown job {job_id}")));
        };
        if entry.state.is_terminal() {
            return Ok(());
        }
        entry.state = JobState::Completed;
        entry.result = Some(result);
        Ok(())
    }

    async fn fail(&self, job_id: Uuid, error: String) -> Result<(), QueueError> {
        let Some(mut entry) = self.jobs.get_mut(&job_id) else {
            return Err(QueueError::Lookup(format!("unknown job {job_id}")));
        };
        if entry.state.is_terminal() {
            return Ok(());
        }
        entry.state = JobState::Failed;
        entry.error = Some(error);
        Ok(())
    }
}
