// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 任务名称的最大长度（字符数）
pub const TASK_NAME_MAX_LEN: u64 = 50;

/// 任务实体
///
/// 系统管理的基本工作单元，归属于看板中的一列。任务有
/// 两个独立的布尔状态：归档标志与活跃标志。归档标志与
/// 归档台账（archived_tasks）保持严格同步。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// 任务唯一标识符
    pub id: i32,
    /// 任务名称，最长 50 个字符
    pub name: String,
    /// 所属状态（看板列）ID
    pub status_id: i32,
    /// 归档标志，与归档台账行一一对应
    #[serde(rename = "isArchived")]
    pub is_archived: bool,
    /// 活跃标志，新任务默认为真
    #[serde(rename = "isActive")]
    pub is_active: bool,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 最后更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 新任务数据
///
/// 创建任务时由服务层组装，名称已通过校验。
#[derive(Debug, Clone)]
pub struct NewTask {
    /// 任务名称
    pub name: String,
    /// 目标状态（看板列）ID
    pub status_id: i32,
}
