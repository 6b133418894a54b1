// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{NewTask, Task};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 记录已存在
    #[error("Record already exists")]
    AlreadyExists,
}

/// 任务仓库特质
///
/// 定义任务数据访问接口。带审计参数的变更方法在实现内
/// 以单个事务同时写入任务行与历史行。
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 创建新任务并记录审计条目
    async fn insert(
        &self,
        task: &NewTask,
        recorded_by: i32,
        action: &str,
    ) -> Result<Task, RepositoryError>;
    /// 根据ID查找任务
    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, RepositoryError>;
    /// 列出某一状态（看板列）下的全部任务
    async fn find_by_status(&self, status_id: i32) -> Result<Vec<Task>, RepositoryError>;
    /// 重命名任务并记录审计条目
    async fn rename(
        &self,
        id: i32,
        name: &str,
        recorded_by: i32,
        action: &str,
    ) -> Result<Task, RepositoryError>;
    /// 设置任务活跃状态并记录审计条目；写入无条件执行
    async fn set_active(
        &self,
        id: i32,
        active: bool,
        recorded_by: i32,
        action: &str,
    ) -> Result<Task, RepositoryError>;
    /// 硬删除任务及其指派、归档和历史记录
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}
