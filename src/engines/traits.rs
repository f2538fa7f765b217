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

use crate::domain::models::crawl::Document;
use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 其他错误
    #[error("Engine error: {0}")]
    Other(String),
}

/// 抓取引擎特质
///
/// 内容抓取与提取引擎的协作方边界。内联路径直接调用它，
/// 工作器在处理队列任务时也经由它抓取页面。引擎如何渲染
/// 或解析页面不属于编排核心的职责。
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// 抓取单个URL并返回其文档
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    /// * `page_options` - 不透明的页面选项，由引擎自行解释
    ///
    /// # 返回值
    ///
    /// * `Ok(Document)` - 抓取到的文档
    /// * `Err(EngineError)` - 抓取失败
    async fn fetch_document(
        &self,
        url: &str,
        page_options: &Map<String, Value>,
    ) -> Result<Document, EngineError>;
}
