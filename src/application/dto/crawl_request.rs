// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::{CrawlMode, CrawlSpec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// 爬取请求DTO
///
/// `POST /v1/crawl`的请求体。`url`缺失或为空不是反序列化
/// 错误，而是由编排器的校验门以400拒绝。
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequestDto {
    /// 目标URL
    #[serde(default)]
    pub url: String,
    /// 爬取模式，默认crawl
    #[serde(default)]
    pub mode: CrawlMode,
    /// 爬取器选项（不透明，原样转发）
    #[serde(default)]
    pub crawler_options: Map<String, Value>,
    /// 页面选项（不透明，原样转发）
    #[serde(default)]
    pub page_options: Map<String, Value>,
    /// 请求来源标记，默认"api"
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_origin() -> String {
    "api".to_string()
}

impl CrawlRequestDto {
    /// 结合认证得到的团队ID，归一化为领域层的爬取规格
    pub fn into_spec(self, team_id: Uuid) -> CrawlSpec {
        CrawlSpec {
            url: self.url,
            mode: self.mode,
            crawler_options: self.crawler_options,
            page_options: self.page_options,
            origin: self.origin,
            team_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_on_minimal_body() {
        let dto: CrawlRequestDto =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(dto.mode, CrawlMode::Crawl);
        assert_eq!(dto.origin, "api");
        assert!(dto.crawler_options.is_empty());
        assert!(dto.page_options.is_empty());
    }

    #[test]
    fn test_missing_url_deserializes_as_empty() {
        let dto: CrawlRequestDto = serde_json::from_str(r#"{"mode": "single_urls"}"#).unwrap();
        assert!(dto.url.is_empty());
        assert_eq!(dto.mode, CrawlMode::SingleUrls);
    }

    #[test]
    fn test_option_bags_pass_through_verbatim() {
        let dto: CrawlRequestDto = serde_json::from_str(
            r#"{
                "url": "https://example.com",
                "crawlerOptions": {"limit": 5, "returnOnlyUrls": true},
                "pageOptions": {"onlyMainContent": false}
            }"#,
        )
        .unwrap();
        assert_eq!(dto.crawler_options["limit"], 5);
        assert_eq!(dto.crawler_options["returnOnlyUrls"], true);
        assert_eq!(dto.page_options["onlyMainContent"], false);
    }
}
