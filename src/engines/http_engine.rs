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

use crate::domain::models::crawl::{Document, DocumentMetadata};
use crate::engines::traits::{EngineError, FetchEngine};
use async_trait::async_trait;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use std::time::Duration;

/// HTTP抓取引擎
///
/// 基于reqwest实现的基本抓取引擎，返回原始HTML内容
/// 并从中提取标题元数据。
pub struct HttpFetchEngine {
    client: reqwest::Client,
}

impl HttpFetchEngine {
    /// 创建新的HTTP抓取引擎实例
    ///
    /// # 参数
    ///
    /// * `timeout` - 单次请求的超时上限
    pub fn new(timeout: Duration) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; crawlgate/0.1; +https://crawlgate.dev)")
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    fn extract_title(html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let selector = Selector::parse("title").ok()?;
        let title = document
            .select(&selector)
            .next()?
            .text()
            .collect::<String>()
            .trim()
            .to_string();
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }
}

#[async_trait]
impl FetchEngine for HttpFetchEngine {
    async fn fetch_document(
        &self,
        url: &str,
        _page_options: &Map<String, Value>,
    ) -> Result<Document, EngineError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout
            } else {
                EngineError::RequestFailed(e)
            }
        })?;

        let status_code = response.status().as_u16();
        let content = response.text().await?;

        Ok(Document {
            metadata: DocumentMetadata {
                title: Self::extract_title(&content),
                source_url: url.to_string(),
                status_code: Some(status_code),
            },
            content,
        })
    }
}
