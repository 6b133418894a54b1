// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 任务历史条目
///
/// 任务审计记录中的一行。历史只追加：系统中不存在
/// 修改或单独删除历史条目的操作。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 条目唯一标识符
    pub id: i32,
    /// 关联任务ID
    pub task_id: i32,
    /// 操作者用户ID
    pub user_id: i32,
    /// 格式化的操作描述
    pub action: String,
    /// 记录时间
    pub created_at: DateTime<FixedOffset>,
}

/// 任务历史分页结果
///
/// 按记录时间倒序排列的一页历史，响应字段名与原接口
/// 保持一致。
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    /// 当前页的历史条目
    #[serde(rename = "task_history")]
    pub entries: Vec<HistoryEntry>,
    /// 当前页码（从 1 开始）
    #[serde(rename = "currentPage")]
    pub current_page: u64,
    /// 是否还有后续页
    #[serde(rename = "hasMorePages")]
    pub has_more_pages: bool,
    /// 最后一页的页码，空历史时为 1
    #[serde(rename = "lastPage")]
    pub last_page: u64,
}

/// 审计动作枚举
///
/// 集中定义所有历史消息模板。仓库层只接收渲染后的
/// 字符串，模板措辞不会散落在代码各处。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditAction {
    /// 任务被创建
    Created,
    /// 任务被重命名
    Renamed {
        /// 原名称
        from: String,
        /// 新名称
        to: String,
    },
    /// 任务被归档
    Archived,
    /// 任务被取消归档
    Unarchived,
    /// 任务活跃状态被变更
    StatusChanged {
        /// 变更后的活跃状态
        active: bool,
    },
}

impl AuditAction {
    /// 渲染以操作者邮箱署名的历史消息
    ///
    /// # 参数
    ///
    /// * `actor_email` - 操作者邮箱
    ///
    /// # 返回值
    ///
    /// 返回写入历史表的完整消息文本
    pub fn message(&self, actor_email: &str) -> String {
        match self {
            AuditAction::Created => format!("{} created the task", actor_email),
            AuditAction::Renamed { from, to } => {
                format!("{} changed task name from {} to {}", actor_email, from, to)
            }
            AuditAction::Archived => format!("{} archived the task", actor_email),
            AuditAction::Unarchived => format!("{} unarchived the task", actor_email),
            AuditAction::StatusChanged { active } => format!(
                "{} changed task status to {}",
                actor_email,
                if *active { "active" } else { "inactive" }
            ),
        }
    }
}
