// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::task_service::TaskService;
use crate::presentation::handlers::task_handler;
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use axum::{
    extract::Extension,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// `/health` 与 `/version` 为公开端点，`/api` 下的端点
/// 全部经过持有者令牌认证。
///
/// # 参数
///
/// * `db` - 数据库连接，认证中间件查询令牌使用
/// * `task_service` - 任务服务
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(db: Arc<DatabaseConnection>, task_service: Arc<TaskService>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version));

    let protected_routes = Router::new()
        .route("/api/create-task", post(task_handler::create_task))
        .route(
            "/api/tasks-for-status/{status_id}",
            get(task_handler::tasks_for_status),
        )
        .route(
            "/api/update-task/{id}",
            put(task_handler::update_task).post(task_handler::update_task),
        )
        .route("/api/archive-task/{id}", post(task_handler::archive_task))
        .route("/api/task/{id}", delete(task_handler::delete_task))
        .route(
            "/api/change-task-status",
            post(task_handler::change_task_status),
        )
        .route(
            "/api/task-history/{task_id}",
            get(task_handler::task_history),
        )
        .layer(middleware::from_fn_with_state(
            AuthState { db },
            auth_middleware,
        ))
        .layer(Extension(task_service));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
