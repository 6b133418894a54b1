// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::task_repository::RepositoryError;
use crate::domain::models::history::{HistoryEntry, HistoryPage};
use async_trait::async_trait;

/// 历史分页的固定页大小
pub const HISTORY_PAGE_SIZE: u64 = 30;

/// 历史仓库特质
///
/// 定义审计记录的数据访问接口。历史只追加，接口上不
/// 存在修改或删除条目的方法。
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// 追加一条审计记录
    async fn record(
        &self,
        task_id: i32,
        user_id: i32,
        action: &str,
    ) -> Result<HistoryEntry, RepositoryError>;
    /// 按时间倒序读取一页历史（页码从 1 开始）
    async fn page(&self, task_id: i32, page: u64) -> Result<HistoryPage, RepositoryError>;
}
