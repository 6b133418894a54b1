// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 变更任务活跃状态请求数据传输对象
///
/// board_id 指定在哪个看板上解析请求者的角色，task_id
/// 指定目标任务，status 为目标活跃状态。
#[derive(Debug, Deserialize, Serialize)]
pub struct ChangeTaskStatusRequestDto {
    /// 解析角色所用的看板ID
    pub board_id: Option<i32>,
    /// 目标任务ID
    pub task_id: Option<i32>,
    /// 目标活跃状态
    pub status: Option<bool>,
}
