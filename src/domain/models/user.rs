// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 用户实体
///
/// 表示一个经过认证的操作者。认证中间件根据请求令牌
/// 加载用户并注入到请求扩展中，后续的权限判定和审计
/// 记录都以该用户为行为主体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// 用户唯一标识符
    pub id: i32,
    /// 用户名称
    pub name: String,
    /// 用户邮箱，审计消息中作为操作者署名
    pub email: String,
}
