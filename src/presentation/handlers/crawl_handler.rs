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

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    application::{
        dto::crawl_request::CrawlRequestDto,
        use_cases::crawl_use_case::{CrawlOrchestrator, CrawlResponse},
    },
    domain::services::status_service::StatusQueryService,
    presentation::errors::error_response,
};

/// 创建爬取请求
///
/// 内联执行直接返回文档集，队列执行返回任务ID。
pub async fn create_crawl(
    Extension(orchestrator): Extension<Arc<CrawlOrchestrator>>,
    Extension(team_id): Extension<Uuid>,
    payload: Result<Json<CrawlRequestDto>, JsonRejection>,
) -> impl IntoResponse {
    // Malformed bodies get the same JSON error shape as every other failure.
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            return error_response(rejection.status(), &rejection.body_text());
        }
    };

    match orchestrator.handle_crawl(team_id, payload).await {
        Ok(CrawlResponse::Inline(docs)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": docs
            })),
        )
            .into_response(),
        Ok(CrawlResponse::Queued { job_id }) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "id": job_id }
            })),
        )
            .into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            error_response(status, &msg)
        }
    }
}

/// 查询爬取任务状态
///
/// 未知任务ID返回404；解析不了的ID同样按未知任务处理。
/// 终态之前data恒为null。
pub async fn get_crawl_status(
    Extension(status_service): Extension<Arc<StatusQueryService>>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let Ok(job_id) = Uuid::parse_str(&job_id) else {
        return error_response(StatusCode::NOT_FOUND, "Job not found");
    };

    match status_service.query_status(job_id).await {
        Ok(snapshot) => {
            let mut body = json!({
                "success": true,
                "status": snapshot.state.to_string(),
                "current": snapshot.progress.current,
                "current_url": snapshot.progress.current_url,
                "current_step": snapshot.progress.current_step,
                "total": snapshot.progress.total,
                "data": snapshot.result,
            });
            if let Some(error) = snapshot.error {
                body["error"] = json!(error);
            }
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            error_response(status, &msg)
        }
    }
}
