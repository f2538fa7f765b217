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

use crate::{
    application::dto::crawl_request::CrawlRequestDto,
    domain::{
        models::crawl::{CrawlOutcome, CrawlResult, CrawlSpec},
        repositories::{
            credit_repository::{CreditError, CreditLedger},
            outcome_repository::OutcomeLogger,
        },
        services::{dispatch_service::JobDispatcher, mode_resolver::ExecutionPath},
    },
    engines::traits::{EngineError, FetchEngine},
    utils::blocklist::is_url_blocked,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// 编排错误类型
///
/// 每个变体对应一类请求终局；表示层把它翻译成HTTP状态码
/// 和错误消息，内部表示绝不直接进入响应体。
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// 校验错误，原样返回调用方，不重试
    #[error("{0}")]
    Validation(String),

    /// 政策错误（封锁名单命中），原样返回，不重试
    #[error("{0}")]
    Policy(String),

    /// 信用额度不足
    #[error("Insufficient credits")]
    Credit,

    /// 内联抓取超出超时上限
    #[error("Inline fetch timed out")]
    Timeout,

    /// 基础设施错误（队列提交、引擎故障），调用方可整体重试
    #[error("{0}")]
    Infrastructure(String),
}

/// 爬取请求的成功响应
#[derive(Debug)]
pub enum CrawlResponse {
    /// 内联执行：直接返回文档集
    Inline(CrawlResult),
    /// 队列执行：返回任务ID供后续轮询
    Queued {
        /// 队列分配的任务ID
        job_id: Uuid,
    },
}

/// 请求门
///
/// 编排器按固定顺序运行的前置检查。任何一个门拒绝就
/// 短路到终局响应，后续的门不再运行。
#[derive(Debug, Clone, Copy)]
enum Gate {
    /// 信用额度检查
    Credits,
    /// URL非空校验
    UrlPresent,
    /// 封锁名单检查
    Blocklist,
}

/// 门的执行顺序：认证由中间件在进入编排器之前完成，
/// 其后依次是信用检查、URL校验、封锁名单检查。
const GATE_ORDER: [Gate; 3] = [Gate::Credits, Gate::UrlPresent, Gate::Blocklist];

/// 请求编排器
///
/// 顶层协调者：对每个进入的爬取请求依次运行请求门、解析
/// 执行路径，然后内联执行或分发队列任务，最后记录一次
/// 终局。每个请求使用独立的编排流程，组件之间不共享可变
/// 内存状态。
pub struct CrawlOrchestrator {
    dispatcher: JobDispatcher,
    engine: Arc<dyn FetchEngine>,
    credits: Arc<dyn CreditLedger>,
    logger: Arc<dyn OutcomeLogger>,
    inline_timeout: Duration,
    request_cost: u32,
}

impl CrawlOrchestrator {
    /// 创建新的请求编排器实例
    pub fn new(
        dispatcher: JobDispatcher,
        engine: Arc<dyn FetchEngine>,
        credits: Arc<dyn CreditLedger>,
        logger: Arc<dyn OutcomeLogger>,
        inline_timeout: Duration,
        request_cost: u32,
    ) -> Self {
        Self {
            dispatcher,
            engine,
            credits,
            logger,
            inline_timeout,
            request_cost,
        }
    }

    /// 处理一个爬取请求
    ///
    /// # 参数
    ///
    /// * `team_id` - 认证协作方提供的团队ID
    /// * `dto` - 请求体
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlResponse)` - 内联文档集或队列任务ID
    /// * `Err(OrchestratorError)` - 某个门拒绝或执行失败
    pub async fn handle_crawl(
        &self,
        team_id: Uuid,
        dto: CrawlRequestDto,
    ) -> Result<CrawlResponse, OrchestratorError> {
        let spec = dto.into_spec(team_id);
        let start = Instant::now();

        let result = self.run(&spec).await;
        self.record_outcome(&spec, &result, start.elapsed());
        result
    }

    async fn run(&self, spec: &CrawlSpec) -> Result<CrawlResponse, OrchestratorError> {
        for gate in GATE_ORDER {
            self.run_gate(gate, spec).await?;
        }

        match ExecutionPath::resolve(spec.mode, &spec.url) {
            ExecutionPath::Inline => self.execute_inline(spec).await,
            ExecutionPath::Queued => {
                let job = self
                    .dispatcher
                    .submit(spec.clone())
                    .await
                    .map_err(|e| OrchestratorError::Infrastructure(e.to_string()))?;
                Ok(CrawlResponse::Queued { job_id: job.id })
            }
        }
    }

    async fn run_gate(&self, gate: Gate, spec: &CrawlSpec) -> Result<(), OrchestratorError> {
        match gate {
            Gate::Credits => self
                .credits
                .check_credits(spec.team_id, self.request_cost)
                .await
                .map_err(|e| match e {
                    CreditError::Insufficient => OrchestratorError::Credit,
                    CreditError::Ledger(msg) => OrchestratorError::Infrastructure(msg),
                }),
            Gate::UrlPresent => {
                if spec.url.trim().is_empty() {
                    Err(OrchestratorError::Validation("Url is required".to_string()))
                } else {
                    Ok(())
                }
            }
            Gate::Blocklist => {
                if is_url_blocked(&spec.url) {
                    Err(OrchestratorError::Policy(
                        "Social media scraping is not supported due to policy restrictions."
                            .to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// 在请求任务内执行抓取，等待受固定上限约束
    async fn execute_inline(&self, spec: &CrawlSpec) -> Result<CrawlResponse, OrchestratorError> {
        let fetch = self.engine.fetch_document(&spec.url, &spec.page_options);
        match tokio::time::timeout(self.inline_timeout, fetch).await {
            Err(_) => Err(OrchestratorError::Timeout),
            Ok(Err(EngineError::Timeout)) => Err(OrchestratorError::Timeout),
            Ok(Err(e)) => Err(OrchestratorError::Infrastructure(e.to_string())),
            Ok(Ok(doc)) => Ok(CrawlResponse::Inline(vec![doc])),
        }
    }

    /// 记录请求终局，发射后不管：日志绝不影响响应
    fn record_outcome(
        &self,
        spec: &CrawlSpec,
        result: &Result<CrawlResponse, OrchestratorError>,
        elapsed: Duration,
    ) {
        let num_docs = match result {
            Ok(CrawlResponse::Inline(docs)) => docs.len(),
            _ => 0,
        };
        let outcome = CrawlOutcome {
            success: result.is_ok(),
            message: result.as_ref().err().map(|e| e.to_string()),
            num_docs,
            time_taken: elapsed.as_secs_f64(),
            team_id: spec.team_id,
            mode: spec.mode,
            url: spec.url.clone(),
            crawler_options: spec.crawler_options.clone(),
            page_options: spec.page_options.clone(),
            origin: spec.origin.clone(),
            logged_at: chrono::Utc::now(),
        };

        if result.is_err() {
            warn!(
                team_id = %spec.team_id,
                url = %spec.url,
                "Crawl request rejected: {}",
                outcome.message.as_deref().unwrap_or("unknown")
            );
        }

        let logger = self.logger.clone();
        tokio::spawn(async move {
            logger.log_outcome(&outcome).await;
        });
    }
}
