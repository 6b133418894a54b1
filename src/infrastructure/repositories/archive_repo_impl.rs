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

use crate::domain::models::archive::ArchiveRecord;
use crate::domain::models::history::AuditAction;
use crate::domain::models::task::Task;
use crate::domain::models::user::User;
use crate::domain::repositories::archive_repository::ArchiveRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::archived_task as archived_entity;
use crate::infrastructure::database::entities::task as task_entity;
use crate::infrastructure::repositories::history_repo_impl::append_entry;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::LockType, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::warn;

/// 归档台账仓库实现
///
/// 台账行、任务上的归档标志与审计记录在同一事务内变更，
/// 任务行在事务内加锁，保证并发翻转时两者保持锁步。
#[derive(Clone)]
pub struct ArchiveRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ArchiveRepositoryImpl {
    /// 创建新的归档台账仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<archived_entity::Model> for ArchiveRecord {
    fn from(model: archived_entity::Model) -> Self {
        Self {
            id: model.id,
            task_id: model.task_id,
            archived_by: model.archived_by,
            archived_at: model.archived_at,
        }
    }
}

/// 在事务内执行一次归档或解档
///
/// 调用方负责加锁读取任务行并提交事务。
async fn transition(
    txn: &DatabaseTransaction,
    task: task_entity::Model,
    actor: &User,
    archive: bool,
) -> Result<task_entity::Model, RepositoryError> {
    let action = if archive {
        archived_entity::ActiveModel {
            task_id: Set(task.id),
            archived_by: Set(actor.id),
            archived_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        AuditAction::Archived
    } else {
        let removed = archived_entity::Entity::delete_many()
            .filter(archived_entity::Column::TaskId.eq(task.id))
            .exec(txn)
            .await?;
        // 标志与台账脱节属于数据异常，解档照常完成
        if removed.rows_affected == 0 {
            warn!("task {} unarchived without a ledger row", task.id);
        }
        AuditAction::Unarchived
    };

    let task_id = task.id;
    let mut model: task_entity::ActiveModel = task.into();
    model.is_archived = Set(archive);
    model.updated_at = Set(Utc::now().into());
    let updated = model.update(txn).await?;

    append_entry(txn, task_id, actor.id, &action.message(&actor.email)).await?;
    Ok(updated)
}

#[async_trait]
impl ArchiveRepository for ArchiveRepositoryImpl {
    async fn toggle(&self, task_id: i32, actor: &User) -> Result<Task, RepositoryError> {
        let txn = self.db.begin().await?;

        let task = task_entity::Entity::find_by_id(task_id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let target = !task.is_archived;
        let updated = transition(&txn, task, actor, target).await?;

        txn.commit().await?;
        Ok(updated.into())
    }

    async fn set_archived(
        &self,
        task_id: i32,
        actor: &User,
        archived: bool,
    ) -> Result<Task, RepositoryError> {
        let txn = self.db.begin().await?;

        let task = task_entity::Entity::find_by_id(task_id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        // 重复归档报错，重复解档宽容处理
        if archived && task.is_archived {
            return Err(RepositoryError::AlreadyExists);
        }

        let updated = transition(&txn, task, actor, archived).await?;

        txn.commit().await?;
        Ok(updated.into())
    }

    async fn find_by_task(&self, task_id: i32) -> Result<Option<ArchiveRecord>, RepositoryError> {
        let model = archived_entity::Entity::find()
            .filter(archived_entity::Column::TaskId.eq(task_id))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }
}
