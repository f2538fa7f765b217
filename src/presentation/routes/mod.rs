// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::crawl_use_case::CrawlOrchestrator;
use crate::domain::services::status_service::StatusQueryService;
use crate::presentation::handlers::crawl_handler;
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

/// 创建应用路由
///
/// # 参数
///
/// * `orchestrator` - 请求编排器
/// * `status_service` - 状态查询服务
/// * `auth_state` - 认证状态
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(
    orchestrator: Arc<CrawlOrchestrator>,
    status_service: Arc<StatusQueryService>,
    auth_state: AuthState,
) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let protected_routes = Router::new()
        .route("/v1/crawl", post(crawl_handler::create_crawl))
        .route("/v1/crawl/{id}", get(crawl_handler::get_crawl_status))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .layer(Extension(orchestrator))
        .layer(Extension(status_service));

    Router::new().merge(public_routes).merge(protected_routes)
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
