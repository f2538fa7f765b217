// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::CrawlMode;

/// 执行路径枚举
///
/// 内联执行在请求/响应周期内完成抓取；队列执行将工作
/// 提交给外部队列由工作器异步处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPath {
    /// 内联执行
    Inline,
    /// 队列执行
    Queued,
}

impl ExecutionPath {
    /// 解析请求的执行路径
    ///
    /// 只有`single_urls`模式且URL中不含批量分隔符`,`时才内联执行；
    /// 其余情况（整站爬取、批量URL列表）一律入队，避免阻塞请求任务。
    ///
    /// 当`single_urls`请求的URL含有`,`时会降级为队列执行，这是
    /// 刻意的保守回退，而非静默忽略调用方的语义。
    pub fn resolve(mode: CrawlMode, url: &str) -> ExecutionPath {
        if mode == CrawlMode::SingleUrls && !url.contains(',') {
            ExecutionPath::Inline
        } else {
            ExecutionPath::Queued
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_url_without_comma_is_inline() {
        assert_eq!(
            ExecutionPath::resolve(CrawlMode::SingleUrls, "https://example.com"),
            ExecutionPath::Inline
        );
    }

    #[test]
    fn test_crawl_mode_is_queued() {
        assert_eq!(
            ExecutionPath::resolve(CrawlMode::Crawl, "https://example.com"),
            ExecutionPath::Queued
        );
    }

    #[test]
    fn test_comma_in_url_falls_back_to_queued() {
        assert_eq!(
            ExecutionPath::resolve(
                CrawlMode::SingleUrls,
                "https://a.example.com,https://b.example.com"
            ),
            ExecutionPath::Queued
        );
    }

    #[test]
    fn test_comma_in_query_param_also_queues() {
        // A legitimate single URL with a comma in the query string still
        // queues. Kept for compatibility with the batching heuristic.
        assert_eq!(
            ExecutionPath::resolve(CrawlMode::SingleUrls, "https://example.com/?ids=1,2"),
            ExecutionPath::Queued
        );
    }
}
