// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::{CrawlJob, CrawlMode, Document, JobProgress};
use crate::engines::traits::FetchEngine;
use crate::queue::crawl_queue::{QueueError, WorkerQueue};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};
use url::Url;
use uuid::Uuid;

/// 爬取工作器
///
/// 从队列领取等待中的任务并驱动到终态：抓取起始页面、
/// 发现同站链接、逐页抓取并更新进度计数，最后写入结果。
/// 进度和状态只由工作器变更，请求侧只读。
pub struct CrawlWorker {
    queue: Arc<dyn WorkerQueue>,
    engine: Arc<dyn FetchEngine>,
    poll_interval: Duration,
    default_page_limit: usize,
    worker_id: Uuid,
}

impl CrawlWorker {
    /// 创建新的爬取工作器实例
    pub fn new(
        queue: Arc<dyn WorkerQueue>,
        engine: Arc<dyn FetchEngine>,
        poll_interval: Duration,
        default_page_limit: usize,
    ) -> Self {
        Self {
            queue,
            engine,
            poll_interval,
            default_page_limit,
            worker_id: Uuid::new_v4(),
        }
    }

    /// 运行工作器循环
    pub async fn run(&self) {
        info!("Crawl worker {} started", self.worker_id);

        loop {
            match self.queue.claim_next().await {
                Ok(Some(job)) => {
                    let job_id = job.id;
                    if let Err(e) = self.process_job(job).await {
                        error!("Error processing job {}: {}", job_id, e);
                    }
                }
                Ok(None) => sleep(self.poll_interval).await,
                Err(e) => {
                    error!("Error polling queue: {}", e);
                    sleep(self.poll_interval).await;
                }
            }
        }
    }

    /// 处理单个任务直到终态
    pub async fn process_job(&self, job: CrawlJob) -> Result<(), QueueError> {
        info!(job_id = %job.id, url = %job.spec.url, mode = %job.spec.mode, "Processing crawl job");

        let limit = page_limit(&job.spec.crawler_options, self.default_page_limit);
        let mut docs: Vec<Document> = Vec::new();
        let mut targets: Vec<String>;

        if job.spec.mode == CrawlMode::SingleUrls && job.spec.url.contains(',') {
            // Batched single_urls request: the url field carries a comma
            // separated list of explicit targets. A crawl-mode URL keeps any
            // comma it has (e.g. in a query string) and is never split.
            targets = job
                .spec
                .url
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        } else if job.spec.mode == CrawlMode::SingleUrls {
            targets = vec![job.spec.url.clone()];
        } else {
            // Site crawl: fetch the root page first and discover links on it.
            self.queue
                .update_progress(
                    job.id,
                    JobProgress {
                        current: 0,
                        total: 1,
                        current_url: job.spec.url.clone(),
                        current_step: "discovering".to_string(),
                    },
                )
                .await?;

            let root = match self
                .engine
                .fetch_document(&job.spec.url, &job.spec.page_options)
                .await
            {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(job_id = %job.id, "Root page fetch failed: {}", e);
                    self.queue.fail(job.id, e.to_string()).await?;
                    return Ok(());
                }
            };

            targets = LinkDiscoverer::same_site_links(&root.content, &job.spec.url);
            docs.push(root);
        }

        targets.truncate(limit.saturating_sub(docs.len()));

        let total = (docs.len() + targets.len()) as u32;
        let mut current = docs.len() as u32;

        for target in targets {
            self.queue
                .update_progress(
                    job.id,
                    JobProgress {
                        current,
                        total,
                        current_url: target.clone(),
                        current_step: "scraping".to_string(),
                    },
                )
                .await?;

            match self
                .engine
                .fetch_document(&target, &job.spec.page_options)
                .await
            {
                Ok(doc) => docs.push(doc),
                Err(e) => warn!(job_id = %job.id, url = %target, "Skipping page: {}", e),
            }
            current += 1;
        }

        self.queue
            .update_progress(
                job.id,
                JobProgress {
                    current,
                    total,
                    current_url: String::new(),
                    current_step: "finalizing".to_string(),
                },
            )
            .await?;

        if docs.is_empty() {
            self.queue
                .fail(job.id, "No pages could be fetched".to_string())
                .await?;
        } else {
            info!(job_id = %job.id, num_docs = docs.len(), "Crawl job completed");
            self.queue.complete(job.id, docs).await?;
        }
        Ok(())
    }
}

fn page_limit(crawler_options: &serde_json::Map<String, serde_json::Value>, default: usize) -> usize {
    crawler_options
        .get("limit")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// 链接发现器
pub struct LinkDiscoverer;

impl LinkDiscoverer {
    /// 从HTML中提取绝对链接
    ///
    /// 跳过页面内锚点、mailto:和javascript:链接，相对路径
    /// 按base解析为绝对URL，并去除fragment。
    pub fn extract_links(html: &str, base_url: &str) -> HashSet<String> {
        let mut links = HashSet::new();
        let Ok(base) = Url::parse(base_url) else {
            return links;
        };
        let Ok(selector) = Selector::parse("a[href]") else {
            return links;
        };

        let document = Html::parse_document(html);
        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if href.starts_with('#')
                || href.starts_with("mailto:")
                || href.starts_with("javascript:")
            {
                continue;
            }
            if let Ok(mut resolved) = base.join(href) {
                resolved.set_fragment(None);
                links.insert(resolved.to_string());
            }
        }
        links
    }

    /// 提取与起始URL同主机的链接，排除起始URL本身
    pub fn same_site_links(html: &str, base_url: &str) -> Vec<String> {
        let Ok(base) = Url::parse(base_url) else {
            return Vec::new();
        };
        let base_host = base.host_str().map(str::to_string);

        let mut links: Vec<String> = Self::extract_links(html, base_url)
            .into_iter()
            .filter(|link| {
                Url::parse(link)
                    .ok()
                    .and_then(|u| u.host_str().map(str::to_string))
                    == base_host
            })
            .filter(|link| link != base_url && link.as_str() != base.as_str())
            .collect();
        links.sort();
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::crawl::{CrawlSpec, DocumentMetadata, JobState};
    use crate::engines::traits::EngineError;
    use crate::queue::crawl_queue::CrawlQueue;
    use crate::queue::memory_queue::MemoryCrawlQueue;
    use async_trait::async_trait;
    use serde_json::{json, Map, Value};

    // --- LinkDiscoverer ---

    #[test]
    fn test_extract_links() {
        let html = r##"
            <html>
                <body>
                    <a href="https://example.com/page1">Page 1</a>
                    <a href="/page2">Page 2</a>
                    <a href="page3.html">Page 3</a>
                    <a href="#fragment">Fragment</a>
                    <a href="mailto:test@example.com">Email</a>
                    <a href="javascript:void(0)">JS</a>
                </body>
            </html>
        "##;
        let links = LinkDiscoverer::extract_links(html, "https://example.com");

        assert!(links.contains("https://example.com/page1"));
        assert!(links.contains("https://example.com/page2"));
        assert!(links.contains("https://example.com/page3.html"));
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn test_same_site_links_filters_foreign_hosts() {
        let html = r##"
            <a href="https://example.com/a">A</a>
            <a href="https://other.example.org/b">B</a>
        "##;
        let links = LinkDiscoverer::same_site_links(html, "https://example.com/");
        assert_eq!(links, vec!["https://example.com/a".to_string()]);
    }

    // --- Worker ---

    /// 按URL路径返回固定HTML的桩引擎
    struct StubEngine;

    #[async_trait]
    impl FetchEngine for StubEngine {
        async fn fetch_document(
            &self,
            url: &str,
            _page_options: &Map<String, Value>,
        ) -> Result<Document, EngineError> {
            if url.contains("broken") {
                return Err(EngineError::Other("connection refused".to_string()));
            }
            let content = if url.ends_with('/') {
                // Root page links to two child pages.
                r#"<html><body>
                    <a href="/child1">One</a>
                    <a href="/child2">Two</a>
                </body></html>"#
                    .to_string()
            } else {
                "<html><body>leaf</body></html>".to_string()
            };
            Ok(Document {
                content,
                metadata: DocumentMetadata {
                    title: None,
                    source_url: url.to_string(),
                    status_code: Some(200),
                },
            })
        }
    }

    fn worker_with(queue: Arc<MemoryCrawlQueue>) -> CrawlWorker {
        CrawlWorker::new(
            queue,
            Arc::new(StubEngine),
            Duration::from_millis(10),
            10,
        )
    }

    fn spec(url: &str, mode: CrawlMode, crawler_options: Map<String, Value>) -> CrawlSpec {
        CrawlSpec {
            url: url.to_string(),
            mode,
            crawler_options,
            page_options: Map::new(),
            origin: "api".to_string(),
            team_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_site_crawl_fetches_root_and_discovered_links() {
        let queue = Arc::new(MemoryCrawlQueue::new());
        let job = queue
            .submit(spec("https://example.com/", CrawlMode::Crawl, Map::new()))
            .await
            .unwrap();
        let worker = worker_with(queue.clone());

        let claimed = queue.claim_next().await.unwrap().unwrap();
        worker.process_job(claimed).await.unwrap();

        let snapshot = queue.get_job(job.id).await.unwrap().unwrap();
        assert_eq!(snapshot.state, JobState::Completed);
        let result = snapshot.result.unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(snapshot.progress.current, 3);
        assert_eq!(snapshot.progress.total, 3);
        assert_eq!(snapshot.progress.current_step, "finalizing");
    }

    #[tokio::test]
    async fn test_limit_option_caps_pages() {
        let queue = Arc::new(MemoryCrawlQueue::new());
        let mut options = Map::new();
        options.insert("limit".to_string(), json!(2));
        let job = queue
            .submit(spec("https://example.com/", CrawlMode::Crawl, options))
            .await
            .unwrap();
        let worker = worker_with(queue.clone());

        let claimed = queue.claim_next().await.unwrap().unwrap();
        worker.process_job(claimed).await.unwrap();

        let snapshot = queue.get_job(job.id).await.unwrap().unwrap();
        assert_eq!(snapshot.result.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_batched_urls_are_split_and_fetched() {
        let queue = Arc::new(MemoryCrawlQueue::new());
        let job = queue
            .submit(spec(
                "https://a.example/x, https://b.example/y",
                CrawlMode::SingleUrls,
                Map::new(),
            ))
            .await
            .unwrap();
        let worker = worker_with(queue.clone());

        let claimed = queue.claim_next().await.unwrap().unwrap();
        worker.process_job(claimed).await.unwrap();

        let snapshot = queue.get_job(job.id).await.unwrap().unwrap();
        assert_eq!(snapshot.state, JobState::Completed);
        let result = snapshot.result.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].metadata.source_url, "https://a.example/x");
        assert_eq!(result[1].metadata.source_url, "https://b.example/y");
    }

    #[tokio::test]
    async fn test_crawl_url_with_comma_in_query_is_not_split() {
        let queue = Arc::new(MemoryCrawlQueue::new());
        let job = queue
            .submit(spec(
                "https://example.com/list?ids=1,2",
                CrawlMode::Crawl,
                Map::new(),
            ))
            .await
            .unwrap();
        let worker = worker_with(queue.clone());

        let claimed = queue.claim_next().await.unwrap().unwrap();
        worker.process_job(claimed).await.unwrap();

        let snapshot = queue.get_job(job.id).await.unwrap().unwrap();
        assert_eq!(snapshot.state, JobState::Completed);
        let result = snapshot.result.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].metadata.source_url,
            "https://example.com/list?ids=1,2"
        );
    }

    #[tokio::test]
    async fn test_unreachable_root_fails_the_job() {
        let queue = Arc::new(MemoryCrawlQueue::new());
        let job = queue
            .submit(spec(
                "https://broken.example/",
                CrawlMode::Crawl,
                Map::new(),
            ))
            .await
            .unwrap();
        let worker = worker_with(queue.clone());

        let claimed = queue.claim_next().await.unwrap().unwrap();
        worker.process_job(claimed).await.unwrap();

        let snapshot = queue.get_job(job.id).await.unwrap().unwrap();
        assert_eq!(snapshot.state, JobState::Failed);
        assert!(snapshot.error.unwrap().contains("connection refused"));
    }
}
