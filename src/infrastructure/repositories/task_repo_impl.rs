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

use crate::domain::models::task::{NewTask, Task};
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::infrastructure::database::entities::archived_task as archived_entity;
use crate::infrastructure::database::entities::task as task_entity;
use crate::infrastructure::database::entities::task_assigned_to as assignment_entity;
use crate::infrastructure::database::entities::task_history as history_entity;
use crate::infrastructure::repositories::history_repo_impl::append_entry;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;

/// 任务仓库实现
///
/// 基于SeaORM实现的任务数据访问层。所有写操作与对应的
/// 审计记录共用一个事务，确保两者要么同时落库要么同时
/// 回滚。
#[derive(Clone)]
pub struct TaskRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TaskRepositoryImpl {
    /// 创建新的任务仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的任务仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<task_entity::Model> for Task {
    fn from(model: task_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            status_id: model.status_id,
            is_archived: model.is_archived,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl TaskRepository for TaskRepositoryImpl {
    async fn insert(
        &self,
        task: &NewTask,
        recorded_by: i32,
        action: &str,
    ) -> Result<Task, RepositoryError> {
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let model = task_entity::ActiveModel {
            name: Set(task.name.clone()),
            status_id: Set(task.status_id),
            is_archived: Set(false),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        append_entry(&txn, model.id, recorded_by, action).await?;

        txn.commit().await?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_status(&self, status_id: i32) -> Result<Vec<Task>, RepositoryError> {
        let models = task_entity::Entity::find()
            .filter(task_entity::Column::StatusId.eq(status_id))
            .order_by_asc(task_entity::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Task::from).collect())
    }

    async fn rename(
        &self,
        id: i32,
        name: &str,
        recorded_by: i32,
        action: &str,
    ) -> Result<Task, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = task_entity::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: task_entity::ActiveModel = model.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await?;

        append_entry(&txn, id, recorded_by, action).await?;

        txn.commit().await?;
        Ok(updated.into())
    }

    async fn set_active(
        &self,
        id: i32,
        active: bool,
        recorded_by: i32,
        action: &str,
    ) -> Result<Task, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = task_entity::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        // 无条件写入：目标值与当前值相同时同样更新并记录
        let mut model: task_entity::ActiveModel = model.into();
        model.is_active = Set(active);
        model.updated_at = Set(Utc::now().into());
        let updated = model.update(&txn).await?;

        append_entry(&txn, id, recorded_by, action).await?;

        txn.commit().await?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        // 先清理从属数据再删任务本身，不依赖数据库的级联配置
        assignment_entity::Entity::delete_many()
            .filter(assignment_entity::Column::TaskId.eq(id))
            .exec(&txn)
            .await?;
        archived_entity::Entity::delete_many()
            .filter(archived_entity::Column::TaskId.eq(id))
            .exec(&txn)
            .await?;
        history_entity::Entity::delete_many()
            .filter(history_entity::Column::TaskId.eq(id))
            .exec(&txn)
            .await?;

        let result = task_entity::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }
}
