// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 爬取模式枚举
///
/// 调用方通过该枚举声明请求语义：抓取单个URL还是
/// 从起始URL爬取整个站点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrawlMode {
    /// 单URL抓取，只处理请求中给出的URL
    SingleUrls,
    /// 站点爬取，从起始URL发现并处理后续页面
    #[default]
    Crawl,
}

impl fmt::Display for CrawlMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CrawlMode::SingleUrls => write!(f, "single_urls"),
            CrawlMode::Crawl => write!(f, "crawl"),
        }
    }
}

impl FromStr for CrawlMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_urls" => Ok(CrawlMode::SingleUrls),
            "crawl" => Ok(CrawlMode::Crawl),
            _ => Err(()),
        }
    }
}

/// 爬取规格
///
/// 归一化后的爬取请求，作为任务提交时的不可变快照。
/// `crawler_options`和`page_options`是不透明的键值包，
/// 原样转发给队列和抓取引擎，本核心不做校验。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSpec {
    /// 目标URL
    pub url: String,
    /// 爬取模式
    pub mode: CrawlMode,
    /// 爬取器选项（不透明）
    pub crawler_options: Map<String, Value>,
    /// 页面选项（不透明）
    pub page_options: Map<String, Value>,
    /// 请求来源标记
    pub origin: String,
    /// 所属团队ID
    pub team_id: Uuid,
}

/// 爬取任务
///
/// 表示一个已提交到队列的异步工作单元。队列拥有任务的
/// 生命周期存储；本核心只持有任务ID作为查询凭证。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlJob {
    /// 任务唯一标识符，由队列在提交时分配
    pub id: Uuid,
    /// 提交时的请求快照
    pub spec: CrawlSpec,
}

/// 任务状态枚举
///
/// 从队列读取的任务生命周期状态。`Completed`和`Failed`
/// 是终态，之后进度和结果不再变化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// 等待中，任务已入队但尚未被工作器领取
    #[default]
    Waiting,
    /// 活跃中，工作器正在处理
    Active,
    /// 已完成
    Completed,
    /// 已失败
    Failed,
    /// 未知状态
    Unknown,
}

impl JobState {
    /// 判断是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobState::Waiting => write!(f, "waiting"),
            JobState::Active => write!(f, "active"),
            JobState::Completed => write!(f, "completed"),
            JobState::Failed => write!(f, "failed"),
            JobState::Unknown => write!(f, "unknown"),
        }
    }
}

/// 任务进度
///
/// 由工作器在执行过程中更新的瞬态视图。`current`单调不减，
/// `total`随着发现新URL可能增长，同一任务ID的进度永不重置。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobProgress {
    /// 已处理条目数
    pub current: u32,
    /// 已发现条目数
    pub total: u32,
    /// 当前处理中的URL，空表示没有
    pub current_url: String,
    /// 当前阶段的可读标签
    pub current_step: String,
}

/// 文档元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// 页面标题
    pub title: Option<String>,
    /// 来源URL
    #[serde(rename = "sourceURL")]
    pub source_url: String,
    /// HTTP状态码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

/// 抓取文档
///
/// 单次抓取产出的内容及其元数据。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// 页面内容
    pub content: String,
    /// 元数据
    pub metadata: DocumentMetadata,
}

/// 爬取结果
///
/// 内联执行或队列任务的最终产出：有序的文档序列。
/// 对给定任务ID只产生一次，之后不可变。
pub type CrawlResult = Vec<Document>;

/// 爬取结果记录
///
/// 每个终局（成功或失败）通过日志协作方记录一次的内容。
#[derive(Debug, Clone, Serialize)]
pub struct CrawlOutcome {
    /// 是否成功
    pub success: bool,
    /// 错误消息（如有）
    pub message: Option<String>,
    /// 文档数量
    pub num_docs: usize,
    /// 耗时（秒）
    pub time_taken: f64,
    /// 所属团队ID
    pub team_id: Uuid,
    /// 爬取模式
    pub mode: CrawlMode,
    /// 目标URL
    pub url: String,
    /// 爬取器选项
    pub crawler_options: Map<String, Value>,
    /// 页面选项
    pub page_options: Map<String, Value>,
    /// 请求来源
    pub origin: String,
    /// 记录时间
    pub logged_at: DateTime<Utc>,
}
