// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 任务生命周期的数据库不变量测试
//!
//! 通过HTTP接口驱动完整的任务生命周期，再直接检查底层表，
//! 确认审计与归档台账和任务状态保持一致。

use super::helpers::{create_test_app, seed_standard_board};
use axum::http::StatusCode;
use boardrs::infrastructure::database::entities::{
    archived_task as archived_entity, task as task_entity, task_assigned_to as assigned_entity,
    task_history as history_entity,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde_json::json;

async fn actions_for(app: &super::helpers::TestApp, task_id: i32) -> Vec<String> {
    history_entity::Entity::find()
        .filter(history_entity::Column::TaskId.eq(task_id))
        .order_by_asc(history_entity::Column::Id)
        .all(app.db.as_ref())
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.action)
        .collect()
}

/// 测试完整生命周期留下的审计序列
///
/// 创建、重命名、停用、归档、解档依次执行，历史表按顺序
/// 记录五条精确的描述文本。
#[tokio::test]
async fn test_full_lifecycle_audit_sequence() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    let response = app
        .server
        .post("/api/create-task")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({ "name": "Ship the beta", "status_id": fixture.status_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let task_id = response.json::<serde_json::Value>()["id"].as_i64().unwrap() as i32;

    app.server
        .put(&format!("/api/update-task/{task_id}"))
        .add_header("Authorization", fixture.owner.bearer())
        .json(&json!({ "name": "Ship the release" }))
        .await;

    app.server
        .post("/api/change-task-status")
        .add_header("Authorization", fixture.owner.bearer())
        .json(&json!({
            "board_id": fixture.board_id,
            "task_id": task_id,
            "status": false
        }))
        .await;

    app.server
        .post(&format!("/api/archive-task/{task_id}"))
        .add_header("Authorization", fixture.owner.bearer())
        .await;

    app.server
        .post(&format!("/api/archive-task/{task_id}"))
        .add_header("Authorization", fixture.owner.bearer())
        .await;

    let actions = actions_for(&app, task_id).await;
    assert_eq!(
        actions,
        vec![
            "adam@example.com created the task",
            "olivia@example.com changed task name from Ship the beta to Ship the release",
            "olivia@example.com changed task status to inactive",
            "olivia@example.com archived the task",
            "olivia@example.com unarchived the task",
        ]
    );
}

/// 测试归档台账与任务标志位保持同步
#[tokio::test]
async fn test_archive_ledger_stays_in_lockstep() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    let ledger_count = |task_id: i32| {
        let db = app.db.clone();
        async move {
            archived_entity::Entity::find()
                .filter(archived_entity::Column::TaskId.eq(task_id))
                .count(db.as_ref())
                .await
                .unwrap()
        }
    };

    assert_eq!(ledger_count(fixture.task_id).await, 0);

    app.server
        .post(&format!("/api/archive-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.owner.bearer())
        .await;

    let task = task_entity::Entity::find_by_id(fixture.task_id)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert!(task.is_archived);
    assert_eq!(ledger_count(fixture.task_id).await, 1);

    let row = archived_entity::Entity::find()
        .filter(archived_entity::Column::TaskId.eq(fixture.task_id))
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.archived_by, fixture.owner.id);

    app.server
        .post(&format!("/api/archive-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.owner.bearer())
        .await;

    let task = task_entity::Entity::find_by_id(fixture.task_id)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert!(!task.is_archived);
    assert_eq!(ledger_count(fixture.task_id).await, 0);
}

/// 测试失败的请求不留任何痕迹
///
/// 权限不足、校验失败和资源缺失的请求都不应产生任务、
/// 历史或台账行。
#[tokio::test]
async fn test_failed_requests_leave_no_trace() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    // 权限不足
    app.server
        .post("/api/create-task")
        .add_header("Authorization", fixture.member.bearer())
        .json(&json!({ "name": "Task", "status_id": fixture.status_id }))
        .await;
    // 校验失败
    app.server
        .post("/api/create-task")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({ "name": "" }))
        .await;
    // 资源缺失
    app.server
        .put("/api/update-task/9999")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({ "name": "Name" }))
        .await;
    // 非所有者归档
    app.server
        .post(&format!("/api/archive-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.admin.bearer())
        .await;

    let tasks = task_entity::Entity::find()
        .count(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(tasks, 1);
    let history = history_entity::Entity::find()
        .count(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(history, 0);
    let ledger = archived_entity::Entity::find()
        .count(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(ledger, 0);

    let task = task_entity::Entity::find_by_id(fixture.task_id)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.name, "Initial task");
    assert!(!task.is_archived);
}

/// 测试删除任务时清理所有从属数据
#[tokio::test]
async fn test_delete_removes_dependent_rows() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    // 归档后解档再停用，攒出历史和指派数据
    app.server
        .post(&format!("/api/archive-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.owner.bearer())
        .await;
    app.server
        .post("/api/change-task-status")
        .add_header("Authorization", fixture.assignee.bearer())
        .json(&json!({
            "board_id": fixture.board_id,
            "task_id": fixture.task_id,
            "status": false
        }))
        .await;

    let history_before = history_entity::Entity::find()
        .filter(history_entity::Column::TaskId.eq(fixture.task_id))
        .count(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(history_before, 2);

    let response = app
        .server
        .delete(&format!("/api/task/{}", fixture.task_id))
        .add_header("Authorization", fixture.owner.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    assert!(task_entity::Entity::find_by_id(fixture.task_id)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .is_none());
    assert_eq!(
        history_entity::Entity::find()
            .filter(history_entity::Column::TaskId.eq(fixture.task_id))
            .count(app.db.as_ref())
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        archived_entity::Entity::find()
            .filter(archived_entity::Column::TaskId.eq(fixture.task_id))
            .count(app.db.as_ref())
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        assigned_entity::Entity::find()
            .filter(assigned_entity::Column::TaskId.eq(fixture.task_id))
            .count(app.db.as_ref())
            .await
            .unwrap(),
        0
    );
}

/// 测试重命名为同名仍然记录历史
///
/// 写入是无条件的，审计按提交的值记录而不做差异比较。
#[tokio::test]
async fn test_noop_rename_still_audited() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    let response = app
        .server
        .put(&format!("/api/update-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({ "name": "Initial task" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let actions = actions_for(&app, fixture.task_id).await;
    assert_eq!(
        actions,
        vec!["adam@example.com changed task name from Initial task to Initial task"]
    );
}

/// 测试重复停用产生重复的历史记录
#[tokio::test]
async fn test_repeated_deactivation_appends_each_time() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;
    let payload = json!({
        "board_id": fixture.board_id,
        "task_id": fixture.task_id,
        "status": false
    });

    for _ in 0..2 {
        let response = app
            .server
            .post("/api/change-task-status")
            .add_header("Authorization", fixture.assignee.bearer())
            .json(&payload)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let actions = actions_for(&app, fixture.task_id).await;
    assert_eq!(
        actions,
        vec![
            "ava@example.com changed task status to inactive",
            "ava@example.com changed task status to inactive",
        ]
    );
}
