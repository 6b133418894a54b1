// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 归档记录实体
///
/// 归档台账中的一行。每个任务至多一行，行的存在与任务
/// 的归档标志严格同步：取消归档即删除该行。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveRecord {
    /// 记录唯一标识符
    pub id: i32,
    /// 被归档的任务ID
    pub task_id: i32,
    /// 执行归档的用户ID
    pub archived_by: i32,
    /// 归档时间
    pub archived_at: DateTime<FixedOffset>,
}
