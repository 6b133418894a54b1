// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;
use std::sync::Arc;

use sea_orm::DbErr;
use thiserror::Error;
use tracing::info;
use validator::{Validate, ValidationErrors};

use crate::application::dto::change_task_status_request::ChangeTaskStatusRequestDto;
use crate::application::dto::create_task_request::CreateTaskRequestDto;
use crate::application::dto::update_task_request::UpdateTaskRequestDto;
use crate::domain::models::history::{AuditAction, HistoryPage};
use crate::domain::models::role::BoardRole;
use crate::domain::models::status::Status;
use crate::domain::models::task::{NewTask, Task};
use crate::domain::models::user::User;
use crate::domain::repositories::archive_repository::ArchiveRepository;
use crate::domain::repositories::history_repository::HistoryRepository;
use crate::domain::repositories::status_repository::StatusRepository;
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::domain::services::role_service::RoleService;

/// 字段级校验错误集合，键为字段名
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// 任务未找到时的响应消息
pub const TASK_NOT_FOUND: &str = "task not found!";
/// 状态（看板列）未找到时的响应消息
pub const TASKS_NOT_FOUND: &str = "tasks not found!";

/// 服务错误类型
///
/// 任务生命周期操作的全部失败形态，表示层据此映射
/// HTTP 状态码
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 输入校验失败
    #[error("Bad request")]
    Validation(FieldErrors),
    /// 目标资源不存在
    #[error("{0}")]
    NotFound(&'static str),
    /// 请求者无权执行该操作
    #[error("Not allowed to perform this action")]
    Forbidden,
    /// 仓库层错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 任务生命周期服务
///
/// 系统的核心引擎：每个操作都按"鉴权、校验、变更、审计、
/// 响应"的顺序执行。审计条目由仓库实现与对应变更写入
/// 同一事务，本服务只负责编排与规则判定。
pub struct TaskService {
    roles: RoleService,
    statuses: Arc<dyn StatusRepository>,
    tasks: Arc<dyn TaskRepository>,
    history: Arc<dyn HistoryRepository>,
    archive: Arc<dyn ArchiveRepository>,
}

impl TaskService {
    /// 创建新的任务生命周期服务实例
    pub fn new(
        roles: RoleService,
        statuses: Arc<dyn StatusRepository>,
        tasks: Arc<dyn TaskRepository>,
        history: Arc<dyn HistoryRepository>,
        archive: Arc<dyn ArchiveRepository>,
    ) -> Self {
        Self {
            roles,
            statuses,
            tasks,
            history,
            archive,
        }
    }

    /// 创建任务
    ///
    /// 校验名称与目标状态，要求请求者为目标看板的所有者
    /// 或管理员。新任务始终为活跃且未归档。
    ///
    /// # 参数
    ///
    /// * `actor` - 经过认证的请求者
    /// * `payload` - 创建请求
    ///
    /// # 返回值
    ///
    /// * `Ok(Task)` - 创建完成的任务
    /// * `Err(ServiceError)` - 校验、权限或仓库错误
    pub async fn create_task(
        &self,
        actor: &User,
        payload: CreateTaskRequestDto,
    ) -> Result<Task, ServiceError> {
        let mut errors = FieldErrors::new();
        if let Err(source) = payload.validate() {
            collect_dto_errors(&mut errors, &source);
        }

        let name = match payload.name.as_deref() {
            Some(name) if !name.is_empty() => Some(name.to_owned()),
            _ => {
                push_error(&mut errors, "name", required_message("name"));
                None
            }
        };

        let status = match payload.status_id {
            Some(status_id) => {
                let status = self.statuses.find_by_id(status_id).await?;
                if status.is_none() {
                    push_error(
                        &mut errors,
                        "status_id",
                        invalid_selection_message("status_id"),
                    );
                }
                status
            }
            None => {
                push_error(&mut errors, "status_id", required_message("status_id"));
                None
            }
        };

        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        let (Some(name), Some(status)) = (name, status) else {
            return Err(ServiceError::Validation(errors));
        };

        let role = self.role_on_board(actor, status.board_id).await?;
        if !role.manages_tasks() {
            return Err(ServiceError::Forbidden);
        }

        let action = AuditAction::Created.message(&actor.email);
        let task = self
            .tasks
            .insert(
                &NewTask {
                    name,
                    status_id: status.id,
                },
                actor.id,
                &action,
            )
            .await?;

        info!(
            "user {} created task {} in status {}",
            actor.id, task.id, status.id
        );
        Ok(task)
    }

    /// 列出某一状态（看板列）下的全部任务
    ///
    /// 对看板持有任意角色即可查看，归档与非活跃任务一并
    /// 返回。
    pub async fn tasks_for_status(
        &self,
        actor: &User,
        status_id: i32,
    ) -> Result<Vec<Task>, ServiceError> {
        let status = self
            .statuses
            .find_by_id(status_id)
            .await?
            .ok_or(ServiceError::NotFound(TASKS_NOT_FOUND))?;

        let role = self.role_on_board(actor, status.board_id).await?;
        if !role.has_board_access() {
            return Err(ServiceError::Forbidden);
        }

        Ok(self.tasks.find_by_status(status_id).await?)
    }

    /// 重命名任务
    ///
    /// 任务必须存在（404 优先于权限判定），随后要求所有者
    /// 或管理员，最后校验新名称。与旧名称相同的写入照常
    /// 执行并照常记录历史。
    pub async fn update_task(
        &self,
        actor: &User,
        task_id: i32,
        payload: UpdateTaskRequestDto,
    ) -> Result<Task, ServiceError> {
        let task = self.find_task(task_id).await?;
        let status = self.status_of(&task).await?;

        let role = self.role_on_board(actor, status.board_id).await?;
        if !role.manages_tasks() {
            return Err(ServiceError::Forbidden);
        }

        let mut errors = FieldErrors::new();
        if let Err(source) = payload.validate() {
            collect_dto_errors(&mut errors, &source);
        }
        let name = match payload.name.as_deref() {
            Some(name) if !name.is_empty() => Some(name.to_owned()),
            _ => {
                push_error(&mut errors, "name", required_message("name"));
                None
            }
        };
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        let Some(name) = name else {
            return Err(ServiceError::Validation(errors));
        };

        let action = AuditAction::Renamed {
            from: task.name.clone(),
            to: name.clone(),
        }
        .message(&actor.email);
        let task = self.tasks.rename(task.id, &name, actor.id, &action).await?;

        info!("user {} renamed task {}", actor.id, task.id);
        Ok(task)
    }

    /// 翻转任务的归档状态
    ///
    /// 仅看板所有者可执行；管理员不满足此门槛。归档台账、
    /// 归档标志与审计条目在仓库层的同一事务内变更。
    pub async fn archive_task(&self, actor: &User, task_id: i32) -> Result<Task, ServiceError> {
        let task = self.find_task(task_id).await?;
        let status = self.status_of(&task).await?;

        let role = self.role_on_board(actor, status.board_id).await?;
        if role != BoardRole::Owner {
            return Err(ServiceError::Forbidden);
        }

        let task = self.archive.toggle(task.id, actor).await?;

        info!(
            "user {} {} task {}",
            actor.id,
            if task.is_archived {
                "archived"
            } else {
                "unarchived"
            },
            task.id
        );
        Ok(task)
    }

    /// 硬删除任务
    ///
    /// 要求所有者或管理员。任务连同其指派、归档台账与
    /// 历史记录在一个事务内全部删除。
    pub async fn delete_task(&self, actor: &User, task_id: i32) -> Result<(), ServiceError> {
        let task = self.find_task(task_id).await?;
        let status = self.status_of(&task).await?;

        let role = self.role_on_board(actor, status.board_id).await?;
        if !role.manages_tasks() {
            return Err(ServiceError::Forbidden);
        }

        self.tasks.delete(task.id).await?;

        info!("user {} deleted task {}", actor.id, task.id);
        Ok(())
    }

    /// 变更任务的活跃状态
    ///
    /// 请求者必须在指定看板上持有任意角色，并且满足：被
    /// 指派到该任务，或者是所有者/管理员。写入无条件执行，
    /// 与当前值相同也照常记录历史。
    pub async fn change_task_status(
        &self,
        actor: &User,
        payload: ChangeTaskStatusRequestDto,
    ) -> Result<Task, ServiceError> {
        let mut errors = FieldErrors::new();

        let board_id = payload.board_id;
        if board_id.is_none() {
            push_error(&mut errors, "board_id", required_message("board_id"));
        }

        let task = match payload.task_id {
            Some(task_id) => {
                let task = self.tasks.find_by_id(task_id).await?;
                if task.is_none() {
                    push_error(&mut errors, "task_id", invalid_selection_message("task_id"));
                }
                task
            }
            None => {
                push_error(&mut errors, "task_id", required_message("task_id"));
                None
            }
        };

        let active = payload.status;
        if active.is_none() {
            push_error(&mut errors, "status", required_message("status"));
        }

        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        let (Some(board_id), Some(task), Some(active)) = (board_id, task, active) else {
            return Err(ServiceError::Validation(errors));
        };

        // 看板由请求者给出，未知看板等同于与其没有任何关系
        let role = match self.roles.resolve_role(actor.id, board_id).await {
            Ok(role) => role,
            Err(RepositoryError::NotFound) => return Err(ServiceError::Forbidden),
            Err(err) => return Err(err.into()),
        };
        if !role.has_board_access() {
            return Err(ServiceError::Forbidden);
        }

        let assigned = self.roles.is_assigned(actor.id, task.id).await?;
        if !assigned && !role.manages_tasks() {
            return Err(ServiceError::Forbidden);
        }

        let action = AuditAction::StatusChanged { active }.message(&actor.email);
        let task = self
            .tasks
            .set_active(task.id, active, actor.id, &action)
            .await?;

        info!(
            "user {} set task {} {}",
            actor.id,
            task.id,
            if task.is_active { "active" } else { "inactive" }
        );
        Ok(task)
    }

    /// 读取任务历史的一页
    ///
    /// 对看板持有任意角色即可查看。页码从 1 开始，超出
    /// 末页时返回空页。
    pub async fn task_history(
        &self,
        actor: &User,
        task_id: i32,
        page: u64,
    ) -> Result<HistoryPage, ServiceError> {
        let task = self.find_task(task_id).await?;
        let status = self.status_of(&task).await?;

        let role = self.role_on_board(actor, status.board_id).await?;
        if !role.has_board_access() {
            return Err(ServiceError::Forbidden);
        }

        Ok(self.history.page(task.id, page).await?)
    }

    async fn find_task(&self, task_id: i32) -> Result<Task, ServiceError> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(ServiceError::NotFound(TASK_NOT_FOUND))
    }

    /// 任务归属的看板列。外键保证其存在，缺失意味着数据
    /// 不一致，按内部错误处理而不是 404。
    async fn status_of(&self, task: &Task) -> Result<Status, ServiceError> {
        self.statuses
            .find_by_id(task.status_id)
            .await?
            .ok_or_else(|| {
                ServiceError::Repository(RepositoryError::Database(DbErr::Custom(format!(
                    "status {} referenced by task {} does not exist",
                    task.status_id, task.id
                ))))
            })
    }

    /// 解析从已有数据行派生出的看板上的角色。看板缺失同样
    /// 属于数据不一致，按内部错误处理。
    async fn role_on_board(&self, actor: &User, board_id: i32) -> Result<BoardRole, ServiceError> {
        match self.roles.resolve_role(actor.id, board_id).await {
            Ok(role) => Ok(role),
            Err(RepositoryError::NotFound) => Err(ServiceError::Repository(
                RepositoryError::Database(DbErr::Custom(format!(
                    "board {} referenced by an existing status does not exist",
                    board_id
                ))),
            )),
            Err(err) => Err(err.into()),
        }
    }
}

fn required_message(field: &str) -> String {
    format!("The {} field is required.", field.replace('_', " "))
}

fn invalid_selection_message(field: &str) -> String {
    format!("The selected {} is invalid.", field.replace('_', " "))
}

fn push_error(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}

fn collect_dto_errors(errors: &mut FieldErrors, source: &ValidationErrors) {
    for (field, issues) in source.field_errors() {
        let field: &str = field.as_ref();
        for issue in issues {
            let message = issue
                .message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| format!("The {} is invalid.", field.replace('_', " ")));
            push_error(errors, field, message);
        }
    }
}

#[cfg(test)]
#[path = "task_service_test.rs"]
mod tests;
