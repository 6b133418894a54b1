// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 状态（看板列）实体
///
/// 看板中的一列，例如 "To Do"、"In Progress"。任务直接
/// 归属于某一列，并通过列间接归属于看板。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    /// 状态唯一标识符
    pub id: i32,
    /// 所属看板ID
    pub board_id: i32,
    /// 列名称
    pub name: String,
    /// 列在看板中的排序位置
    pub position: i32,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
}
