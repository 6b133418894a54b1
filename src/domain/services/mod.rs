// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了业务规则，
/// 协调多个领域对象来完成业务操作。
///
/// 包含的服务：
/// - 角色服务（role_service）：解析用户在看板上的有效角色
/// - 任务服务（task_service）：任务生命周期的编排与权限门控
pub mod role_service;
pub mod task_service;
