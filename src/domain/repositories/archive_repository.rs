// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::task_repository::RepositoryError;
use crate::domain::models::archive::ArchiveRecord;
use crate::domain::models::task::Task;
use crate::domain::models::user::User;
use async_trait::async_trait;

/// 归档仓库特质
///
/// 归档台账拥有"台账行 ⟺ 归档标志"这一不变量：所有
/// 变更方法在实现内以单个事务同时维护 archived_tasks 行、
/// tasks.is_archived 标志和审计记录。
#[async_trait]
pub trait ArchiveRepository: Send + Sync {
    /// 在行锁保护下翻转任务的归档状态
    async fn toggle(&self, task_id: i32, actor: &User) -> Result<Task, RepositoryError>;
    /// 将任务归档状态设为指定值；重复归档返回 AlreadyExists，
    /// 取消归档时台账行缺失则记录告警后继续
    async fn set_archived(
        &self,
        task_id: i32,
        actor: &User,
        archived: bool,
    ) -> Result<Task, RepositoryError>;
    /// 查找任务的归档台账行
    async fn find_by_task(&self, task_id: i32) -> Result<Option<ArchiveRecord>, RepositoryError>;
}
