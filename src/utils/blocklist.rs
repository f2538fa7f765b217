// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use url::Url;

/// 政策禁止抓取的域名列表
///
/// 主要是社交媒体平台，抓取这些站点违反其服务条款。
static BLOCKED_DOMAINS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "facebook.com",
        "twitter.com",
        "x.com",
        "instagram.com",
        "linkedin.com",
        "pinterest.com",
        "snapchat.com",
        "tiktok.com",
        "reddit.com",
        "youtube.com",
        "whatsapp.com",
        "telegram.org",
        "weibo.com",
        "vk.com",
    ]
});

/// 判断URL是否被封锁名单禁止抓取
///
/// 纯谓词，无副作用、无网络访问。必须在任何抓取或任务
/// 提交之前调用；命中名单的请求以政策错误终止，绝不静默
/// 降级行为。
///
/// # 参数
///
/// * `url` - 待检查的URL
///
/// # 返回值
///
/// 命中封锁名单返回true；URL无法解析时返回false，交由
/// 后续校验和抓取阶段处理。
pub fn is_url_blocked(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.strip_prefix("www.").unwrap_or(host);

    BLOCKED_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}
