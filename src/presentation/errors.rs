// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::repositories::task_repository::RepositoryError;
use crate::domain::services::task_service::{ServiceError, TASK_NOT_FOUND};

/// 内部错误统一对外的响应消息，细节只进日志
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong, please contact administrator!";

/// 应用错误类型
///
/// 封装服务层错误并映射到HTTP响应：
/// - 校验失败 -> 400，携带字段级错误明细
/// - 资源不存在 -> 404
/// - 权限不足 -> 405
/// - 其余 -> 500，响应不泄露内部细节
#[derive(Debug)]
pub struct AppError(ServiceError);

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            ServiceError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Bad request", "errors": errors })),
            )
                .into_response(),
            ServiceError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": message })),
            )
                .into_response(),
            ServiceError::Forbidden => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "message": "Not allowed to perform this action" })),
            )
                .into_response(),
            // 服务层查到任务后仓库层又未命中，说明任务在两次
            // 读取之间被删除，按资源不存在处理
            ServiceError::Repository(RepositoryError::NotFound) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": TASK_NOT_FOUND })),
            )
                .into_response(),
            ServiceError::Repository(err) => {
                tracing::error!("unhandled repository error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": INTERNAL_ERROR_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}
