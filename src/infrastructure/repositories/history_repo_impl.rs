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

use crate::domain::models::history::{HistoryEntry, HistoryPage};
use crate::domain::repositories::history_repository::{HistoryRepository, HISTORY_PAGE_SIZE};
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::task_history as history_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

/// 在给定连接上追加一条审计记录
///
/// 接受任意连接，便于任务仓库与归档仓库在各自的事务内
/// 将审计写入与对应变更一起提交。
pub(crate) async fn append_entry<C: ConnectionTrait>(
    conn: &C,
    task_id: i32,
    user_id: i32,
    action: &str,
) -> Result<history_entity::Model, DbErr> {
    history_entity::ActiveModel {
        task_id: Set(task_id),
        user_id: Set(user_id),
        action: Set(action.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// 任务历史仓库实现
///
/// 基于SeaORM实现的审计记录数据访问层
#[derive(Clone)]
pub struct HistoryRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl HistoryRepositoryImpl {
    /// 创建新的任务历史仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<history_entity::Model> for HistoryEntry {
    fn from(model: history_entity::Model) -> Self {
        Self {
            id: model.id,
            task_id: model.task_id,
            user_id: model.user_id,
            action: model.action,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl HistoryRepository for HistoryRepositoryImpl {
    async fn record(
        &self,
        task_id: i32,
        user_id: i32,
        action: &str,
    ) -> Result<HistoryEntry, RepositoryError> {
        let model = append_entry(self.db.as_ref(), task_id, user_id, action).await?;
        Ok(model.into())
    }

    async fn page(&self, task_id: i32, page: u64) -> Result<HistoryPage, RepositoryError> {
        // 页码从 1 开始；0 按 1 处理
        let page = page.max(1);

        let paginator = history_entity::Entity::find()
            .filter(history_entity::Column::TaskId.eq(task_id))
            .order_by_desc(history_entity::Column::CreatedAt)
            .order_by_desc(history_entity::Column::Id)
            .paginate(self.db.as_ref(), HISTORY_PAGE_SIZE);

        // 无记录时仍然报告为一页，与超出末页的空页区分开
        let last_page = paginator.num_pages().await?.max(1);
        let entries = paginator
            .fetch_page(page - 1)
            .await?
            .into_iter()
            .map(HistoryEntry::from)
            .collect();

        Ok(HistoryPage {
            entries,
            current_page: page,
            has_more_pages: page < last_page,
            last_page,
        })
    }
}
