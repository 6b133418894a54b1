// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 存储角色枚举
///
/// 表示 board_members 表中实际存储的角色，只有 Admin 和
/// Member 两种。看板所有者不占成员行，其角色由
/// boards.owner_id 派生。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MemberRole {
    /// 管理员，可创建、重命名、删除任务
    Admin,
    /// 普通成员，可查看任务与历史
    #[default]
    Member,
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemberRole::Admin => write!(f, "Admin"),
            MemberRole::Member => write!(f, "Member"),
        }
    }
}

impl FromStr for MemberRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(MemberRole::Admin),
            "Member" => Ok(MemberRole::Member),
            _ => Err(()),
        }
    }
}

/// 有效角色枚举
///
/// 表示一次角色解析的结果：所有者、管理员、成员或与
/// 看板无任何关系（None）。None 不通过任何权限门槛。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardRole {
    /// 看板所有者，拥有全部权限（含归档）
    Owner,
    /// 管理员，拥有除归档外的全部管理权限
    Admin,
    /// 普通成员，只读权限加受指派操作
    Member,
    /// 与看板无关系
    None,
}

impl BoardRole {
    /// 是否具备任务管理权限（创建、重命名、删除）
    pub fn manages_tasks(&self) -> bool {
        matches!(self, BoardRole::Owner | BoardRole::Admin)
    }

    /// 是否与看板存在任何关系（查看任务与历史的门槛）
    pub fn has_board_access(&self) -> bool {
        !matches!(self, BoardRole::None)
    }
}

impl From<MemberRole> for BoardRole {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::Admin => BoardRole::Admin,
            MemberRole::Member => BoardRole::Member,
        }
    }
}

impl fmt::Display for BoardRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardRole::Owner => write!(f, "Owner"),
            BoardRole::Admin => write!(f, "Admin"),
            BoardRole::Member => write!(f, "Member"),
            BoardRole::None => write!(f, "None"),
        }
    }
}
