// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 重命名任务请求数据传输对象
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateTaskRequestDto {
    /// 新的任务名称
    #[validate(length(max = 50, message = "The name must not be greater than 50 characters."))]
    pub name: Option<String>,
}
