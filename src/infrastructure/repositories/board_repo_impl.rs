// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::board::{Board, BoardMember};
use crate::domain::repositories::board_repository::BoardRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::board as board_entity;
use crate::infrastructure::database::entities::board_member as member_entity;
use crate::infrastructure::database::entities::task_assigned_to as assignment_entity;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use std::sync::Arc;

/// 看板仓库实现
///
/// 基于SeaORM实现的看板与成员数据访问层
#[derive(Clone)]
pub struct BoardRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl BoardRepositoryImpl {
    /// 创建新的看板仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<board_entity::Model> for Board {
    fn from(model: board_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            owner_id: model.owner_id,
            created_at: model.created_at,
        }
    }
}

impl From<member_entity::Model> for BoardMember {
    fn from(model: member_entity::Model) -> Self {
        Self {
            id: model.id,
            board_id: model.board_id,
            user_id: model.user_id,
            // 未知的角色值按最低权限处理
            role: model.role.parse().unwrap_or_default(),
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl BoardRepository for BoardRepositoryImpl {
    async fn find_by_id(&self, id: i32) -> Result<Option<Board>, RepositoryError> {
        let model = board_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_member(
        &self,
        board_id: i32,
        user_id: i32,
    ) -> Result<Option<BoardMember>, RepositoryError> {
        let model = member_entity::Entity::find()
            .filter(member_entity::Column::BoardId.eq(board_id))
            .filter(member_entity::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn is_assigned(&self, user_id: i32, task_id: i32) -> Result<bool, RepositoryError> {
        let count = assignment_entity::Entity::find()
            .filter(assignment_entity::Column::UserId.eq(user_id))
            .filter(assignment_entity::Column::TaskId.eq(task_id))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }
}
