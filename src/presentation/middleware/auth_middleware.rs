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

use crate::presentation::errors::error_response;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// API密钥到团队ID的映射
    pub api_keys: Arc<HashMap<String, Uuid>>,
}

/// 认证中间件
///
/// 校验请求的Bearer API密钥并把团队ID注入请求扩展。
/// 认证在任何编排门之前运行，失败以认证协作方给出的
/// 状态码短路整个请求。
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::to_string);

    let Some(token) = token else {
        return error_response(StatusCode::UNAUTHORIZED, "Unauthorized: missing API key");
    };

    match state.api_keys.get(&token) {
        Some(team_id) => {
            req.extensions_mut().insert(*team_id);
            next.run(req).await
        }
        None => {
            warn!("Rejected request with unknown API key");
            error_response(StatusCode::UNAUTHORIZED, "Unauthorized: invalid API key")
        }
    }
}
