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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

/// 应用程序配置设置
///
/// 包含服务器、认证、爬取、工作器和信用等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 认证配置
    #[serde(default)]
    pub auth: AuthSettings,
    /// 爬取配置
    pub crawl: CrawlSettings,
    /// 工作器配置
    pub worker: WorkerSettings,
    /// 信用配置
    pub credits: CreditSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 认证配置设置
#[derive(Debug, Default, Deserialize)]
pub struct AuthSettings {
    /// API密钥到团队ID的映射
    #[serde(default)]
    pub api_keys: HashMap<String, Uuid>,
}

/// 爬取配置设置
#[derive(Debug, Deserialize)]
pub struct CrawlSettings {
    /// 内联抓取的超时上限（秒）
    pub inline_timeout_secs: u64,
    /// 单次请求的信用成本
    pub request_cost: u32,
}

/// 工作器配置设置
#[derive(Debug, Deserialize)]
pub struct WorkerSettings {
    /// 队列轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 单个爬取任务的默认页面上限
    pub default_page_limit: usize,
}

/// 信用配置设置
#[derive(Debug, Deserialize)]
pub struct CreditSettings {
    /// 团队默认信用余额
    pub default_balance: i64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default crawl settings
            .set_default("crawl.inline_timeout_secs", 60)?
            .set_default("crawl.request_cost", 1)?
            // Default worker settings
            .set_default("worker.poll_interval_ms", 500)?
            .set_default("worker.default_page_limit", 10)?
            // Default credit settings
            .set_default("credits.default_balance", 1000)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CRAWLGATE").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_files() {
        let settings = Settings::new().expect("defaults should load");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.crawl.inline_timeout_secs, 60);
        assert_eq!(settings.crawl.request_cost, 1);
        assert_eq!(settings.worker.default_page_limit, 10);
        assert!(settings.auth.api_keys.is_empty());
    }
}
