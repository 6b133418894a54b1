// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::task_repository::RepositoryError;
use crate::domain::models::board::{Board, BoardMember};
use async_trait::async_trait;

/// 看板仓库特质
///
/// 定义角色解析所需的只读数据访问接口
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// 根据ID查找看板
    async fn find_by_id(&self, id: i32) -> Result<Option<Board>, RepositoryError>;
    /// 查找用户在看板上的成员关系
    async fn find_member(
        &self,
        board_id: i32,
        user_id: i32,
    ) -> Result<Option<BoardMember>, RepositoryError>;
    /// 检查用户是否被指派到任务
    async fn is_assigned(&self, user_id: i32, task_id: i32) -> Result<bool, RepositoryError>;
}
