// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::crawl_use_case::OrchestratorError;
use crate::domain::services::status_service::StatusError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// 构造统一的错误响应体
///
/// 所有失败响应都是`{success:false, error:<message>}`形式的JSON。
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": message
        })),
    )
        .into_response()
}

impl From<OrchestratorError> for (StatusCode, String) {
    fn from(err: OrchestratorError) -> Self {
        let status = match err {
            OrchestratorError::Validation(_) => StatusCode::BAD_REQUEST,
            OrchestratorError::Policy(_) => StatusCode::FORBIDDEN,
            OrchestratorError::Credit => StatusCode::PAYMENT_REQUIRED,
            OrchestratorError::Timeout | OrchestratorError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, err.to_string())
    }
}

impl From<StatusError> for (StatusCode, String) {
    fn from(err: StatusError) -> Self {
        let status = match err {
            StatusError::NotFound => StatusCode::NOT_FOUND,
            StatusError::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, err.to_string())
    }
}
