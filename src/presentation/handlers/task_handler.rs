// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::change_task_status_request::ChangeTaskStatusRequestDto;
use crate::application::dto::create_task_request::CreateTaskRequestDto;
use crate::application::dto::update_task_request::UpdateTaskRequestDto;
use crate::domain::models::history::HistoryPage;
use crate::domain::models::task::Task;
use crate::domain::models::user::User;
use crate::domain::services::task_service::TaskService;
use crate::presentation::errors::AppError;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

/// 任务历史分页查询参数
#[derive(Debug, Deserialize)]
pub struct HistoryPageQuery {
    /// 页码，从 1 开始，缺省为 1
    pub page: Option<u64>,
}

/// 创建任务
///
/// # 参数
///
/// * `service` - 任务服务
/// * `actor` - 认证中间件注入的当前用户
/// * `payload` - 创建任务请求
///
/// # 返回值
///
/// * `201` - 创建完成的任务
/// * `400/405/500` - 校验、权限或内部错误
pub async fn create_task(
    Extension(service): Extension<Arc<TaskService>>,
    Extension(actor): Extension<User>,
    Json(payload): Json<CreateTaskRequestDto>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let task = service.create_task(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// 列出某一状态（看板列）下的全部任务
pub async fn tasks_for_status(
    Extension(service): Extension<Arc<TaskService>>,
    Extension(actor): Extension<User>,
    Path(status_id): Path<i32>,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = service.tasks_for_status(&actor, status_id).await?;
    Ok(Json(tasks))
}

/// 重命名任务
pub async fn update_task(
    Extension(service): Extension<Arc<TaskService>>,
    Extension(actor): Extension<User>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTaskRequestDto>,
) -> Result<Json<Task>, AppError> {
    let task = service.update_task(&actor, id, payload).await?;
    Ok(Json(task))
}

/// 翻转任务的归档状态
pub async fn archive_task(
    Extension(service): Extension<Arc<TaskService>>,
    Extension(actor): Extension<User>,
    Path(id): Path<i32>,
) -> Result<Json<Task>, AppError> {
    let task = service.archive_task(&actor, id).await?;
    Ok(Json(task))
}

/// 删除任务
///
/// # 返回值
///
/// * `204` - 删除完成，无响应体
pub async fn delete_task(
    Extension(service): Extension<Arc<TaskService>>,
    Extension(actor): Extension<User>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    service.delete_task(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 变更任务的活跃状态
pub async fn change_task_status(
    Extension(service): Extension<Arc<TaskService>>,
    Extension(actor): Extension<User>,
    Json(payload): Json<ChangeTaskStatusRequestDto>,
) -> Result<Json<Task>, AppError> {
    let task = service.change_task_status(&actor, payload).await?;
    Ok(Json(task))
}

/// 读取任务历史的一页
///
/// # 参数
///
/// * `task_id` - 任务ID
/// * `query` - 分页参数，`?page=n`
pub async fn task_history(
    Extension(service): Extension<Arc<TaskService>>,
    Extension(actor): Extension<User>,
    Path(task_id): Path<i32>,
    Query(query): Query<HistoryPageQuery>,
) -> Result<Json<HistoryPage>, AppError> {
    let page = service
        .task_history(&actor, task_id, query.page.unwrap_or(1))
        .await?;
    Ok(Json(page))
}
