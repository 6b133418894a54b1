// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::status::Status;
use crate::domain::repositories::status_repository::StatusRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::status as status_entity;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;

/// 状态（看板列）仓库实现
#[derive(Clone)]
pub struct StatusRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl StatusRepositoryImpl {
    /// 创建新的状态仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<status_entity::Model> for Status {
    fn from(model: status_entity::Model) -> Self {
        Self {
            id: model.id,
            board_id: model.board_id,
            name: model.name,
            position: model.position,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl StatusRepository for StatusRepositoryImpl {
    async fn find_by_id(&self, id: i32) -> Result<Option<Status>, RepositoryError> {
        let model = status_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }
}
