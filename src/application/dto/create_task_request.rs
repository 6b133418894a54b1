// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 创建任务请求数据传输对象
///
/// 字段全部可选：缺失字段由服务层转换为字段级校验错误，
/// 而不是在反序列化阶段被拒绝。
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateTaskRequestDto {
    /// 任务名称
    #[validate(length(max = 50, message = "The name must not be greater than 50 characters."))]
    pub name: Option<String>,
    /// 目标状态（看板列）ID
    pub status_id: Option<i32>,
}
