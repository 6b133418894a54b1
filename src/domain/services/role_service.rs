// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use crate::domain::models::role::BoardRole;
use crate::domain::repositories::board_repository::BoardRepository;
use crate::domain::repositories::task_repository::RepositoryError;

/// 角色解析服务
///
/// 把用户与看板的关系解析为有效角色。所有者由
/// boards.owner_id 派生且优先于成员表中的任何存储角色。
#[derive(Clone)]
pub struct RoleService {
    boards: Arc<dyn BoardRepository>,
}

impl RoleService {
    /// 创建新的角色解析服务实例
    pub fn new(boards: Arc<dyn BoardRepository>) -> Self {
        Self { boards }
    }

    /// 解析用户在看板上的有效角色
    ///
    /// # 参数
    ///
    /// * `user_id` - 用户ID
    /// * `board_id` - 看板ID
    ///
    /// # 返回值
    ///
    /// * `Ok(BoardRole)` - 解析出的有效角色，无关系时为 None
    /// * `Err(RepositoryError::NotFound)` - 看板不存在
    pub async fn resolve_role(
        &self,
        user_id: i32,
        board_id: i32,
    ) -> Result<BoardRole, RepositoryError> {
        let board = self
            .boards
            .find_by_id(board_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        if board.owner_id == user_id {
            return Ok(BoardRole::Owner);
        }

        Ok(match self.boards.find_member(board_id, user_id).await? {
            Some(member) => member.role.into(),
            None => BoardRole::None,
        })
    }

    /// 检查用户是否被指派到任务
    pub async fn is_assigned(&self, user_id: i32, task_id: i32) -> Result<bool, RepositoryError> {
        self.boards.is_assigned(user_id, task_id).await
    }
}

#[cfg(test)]
#[path = "role_service_test.rs"]
mod tests;
