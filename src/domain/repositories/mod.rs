// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 看板仓库（board_repository）：看板、成员关系与任务指派的查询
/// - 状态仓库（status_repository）：看板列的查询
/// - 任务仓库（task_repository）：任务的持久化与事务性变更
/// - 历史仓库（history_repository）：审计记录的追加与分页读取
/// - 归档仓库（archive_repository）：归档台账与归档标志的同步变更
///
/// 这些接口确保了领域层不依赖于具体的数据存储技术，
/// 提高了系统的可测试性和可维护性.
pub mod archive_repository;
pub mod board_repository;
pub mod history_repository;
pub mod status_repository;
pub mod task_repository;
