// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::task_repository::RepositoryError;
use crate::domain::models::status::Status;
use async_trait::async_trait;

/// 状态仓库特质
///
/// 定义看板列的数据访问接口
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// 根据ID查找状态
    async fn find_by_id(&self, id: i32) -> Result<Option<Status>, RepositoryError>;
}
