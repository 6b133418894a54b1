// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 看板（board）：任务的顶层容器及其成员关系
/// - 角色（role）：用户在看板上的权限角色
/// - 状态（status）：看板中的一列，任务的直接归属
/// - 任务（task）：系统管理的基本工作单元
/// - 历史（history）：任务的只追加审计记录
/// - 归档（archive）：归档事件台账
/// - 用户（user）：经过认证的操作者
///
/// 这些模型构成了系统的数据基础，定义了业务概念的
/// 结构和行为，是领域驱动设计的核心组成部分。
pub mod archive;
pub mod board;
pub mod history;
pub mod role;
pub mod status;
pub mod task;
pub mod user;
