// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::models::role::MemberRole;

/// 看板实体
///
/// 任务体系的顶层容器。每个看板恰好有一个所有者，
/// 所有者身份由 owner_id 派生，不写入成员表。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// 看板唯一标识符
    pub id: i32,
    /// 看板名称
    pub name: String,
    /// 所有者用户ID
    pub owner_id: i32,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
}

/// 看板成员关系实体
///
/// 一行表示一个用户在一个看板上的存储角色，
/// 每个用户在每个看板上至多一行。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardMember {
    /// 成员关系唯一标识符
    pub id: i32,
    /// 所属看板ID
    pub board_id: i32,
    /// 成员用户ID
    pub user_id: i32,
    /// 存储角色（Admin 或 Member）
    pub role: MemberRole,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
}
