// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, seed_standard_board};
use axum::http::StatusCode;
use boardrs::infrastructure::database::entities::{
    archived_task as archived_entity, task as task_entity, task_history as history_entity,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{json, Value};

/// 测试公开端点无需认证
#[tokio::test]
async fn test_health_and_version_are_public() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let response = app.server.get("/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

/// 测试受保护端点对未认证请求返回401
#[tokio::test]
async fn test_api_requires_authentication() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/create-task")
        .json(&json!({ "name": "Task", "status_id": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["message"], "Unauthenticated.");

    let response = app
        .server
        .get("/api/tasks-for-status/1")
        .add_header("Authorization", "Bearer bogus-token")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

/// 测试管理员成功创建任务
///
/// 验证201响应、任务的初始标志位，以及数据库中的任务行
/// 和审计记录。
#[tokio::test]
async fn test_create_task_success() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    let response = app
        .server
        .post("/api/create-task")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({ "name": "Write the launch plan", "status_id": fixture.status_id }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["name"], "Write the launch plan");
    assert_eq!(body["status_id"], fixture.status_id);
    assert_eq!(body["isActive"], true);
    assert_eq!(body["isArchived"], false);

    let task_id = body["id"].as_i64().unwrap() as i32;
    let task = task_entity::Entity::find_by_id(task_id)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.name, "Write the launch plan");

    let history = history_entity::Entity::find()
        .filter(history_entity::Column::TaskId.eq(task_id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, "adam@example.com created the task");
    assert_eq!(history[0].user_id, fixture.admin.id);
}

/// 测试创建任务的校验错误信封
///
/// 400响应携带"Bad request"消息和字段级错误明细。
#[tokio::test]
async fn test_create_task_validation_envelope() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    let response = app
        .server
        .post("/api/create-task")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "message": "Bad request",
            "errors": {
                "name": ["The name field is required."],
                "status_id": ["The status id field is required."]
            }
        })
    );

    // 超长名称
    let response = app
        .server
        .post("/api/create-task")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({ "name": "x".repeat(51), "status_id": fixture.status_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["errors"]["name"][0],
        "The name must not be greater than 50 characters."
    );

    // 不存在的状态按校验错误而不是404处理
    let response = app
        .server
        .post("/api/create-task")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({ "name": "Task", "status_id": 9999 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"]["status_id"][0], "The selected status id is invalid.");
}

/// 测试普通成员与外部用户不能创建任务
#[tokio::test]
async fn test_create_task_forbidden_without_manage_role() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    for actor in [&fixture.member, &fixture.outsider] {
        let response = app
            .server
            .post("/api/create-task")
            .add_header("Authorization", actor.bearer())
            .json(&json!({ "name": "Task", "status_id": fixture.status_id }))
            .await;

        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.json::<Value>()["message"],
            "Not allowed to perform this action"
        );
    }

    // 失败的请求不产生任务和历史
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
}

/// 测试按状态列出任务
///
/// 任意角色可以查看；归档与非活跃任务一并返回。
#[tokio::test]
async fn test_tasks_for_status_listing() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    // 所有者先归档这条任务
    let response = app
        .server
        .post(&format!("/api/archive-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.owner.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .get(&format!("/api/tasks-for-status/{}", fixture.status_id))
        .add_header("Authorization", fixture.member.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let tasks = body.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["isArchived"], true);

    // 不存在的状态
    let response = app
        .server
        .get("/api/tasks-for-status/9999")
        .add_header("Authorization", fixture.member.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "tasks not found!");

    // 外部用户不可见
    let response = app
        .server
        .get(&format!("/api/tasks-for-status/{}", fixture.status_id))
        .add_header("Authorization", fixture.outsider.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

/// 测试重命名任务，PUT与POST两种方法等价
#[tokio::test]
async fn test_update_task_via_put_and_post() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    let response = app
        .server
        .put(&format!("/api/update-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({ "name": "Renamed once" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["name"], "Renamed once");

    let response = app
        .server
        .post(&format!("/api/update-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.owner.bearer())
        .json(&json!({ "name": "Renamed twice" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let history = history_entity::Entity::find()
        .filter(history_entity::Column::TaskId.eq(fixture.task_id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    let actions: Vec<&str> = history.iter().map(|h| h.action.as_str()).collect();
    assert!(actions
        .contains(&"adam@example.com changed task name from Initial task to Renamed once"));
    assert!(actions
        .contains(&"olivia@example.com changed task name from Renamed once to Renamed twice"));

    // 不存在的任务
    let response = app
        .server
        .put("/api/update-task/9999")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({ "name": "Name" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "task not found!");

    // 名称为空
    let response = app
        .server
        .put(&format!("/api/update-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({ "name": "" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"]["name"][0], "The name field is required.");
}

/// 测试重命名的权限判定先于输入校验
///
/// 普通成员提交非法负载时应得到405而不是400。
#[tokio::test]
async fn test_update_permission_checked_before_validation() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    let response = app
        .server
        .put(&format!("/api/update-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.member.bearer())
        .json(&json!({ "name": "" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

/// 测试归档是所有者专属操作且为翻转语义
#[tokio::test]
async fn test_archive_task_owner_only_toggle() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    // 管理员也不行
    let response = app
        .server
        .post(&format!("/api/archive-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.admin.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

    // 所有者归档
    let response = app
        .server
        .post(&format!("/api/archive-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.owner.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["isArchived"], true);

    let ledger = archived_entity::Entity::find()
        .filter(archived_entity::Column::TaskId.eq(fixture.task_id))
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ledger.archived_by, fixture.owner.id);

    // 再次调用即解档
    let response = app
        .server
        .post(&format!("/api/archive-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.owner.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["isArchived"], false);

    let ledger = archived_entity::Entity::find()
        .filter(archived_entity::Column::TaskId.eq(fixture.task_id))
        .one(app.db.as_ref())
        .await
        .unwrap();
    assert!(ledger.is_none());
}

/// 测试删除任务
#[tokio::test]
async fn test_delete_task() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    // 普通成员不能删除
    let response = app
        .server
        .delete(&format!("/api/task/{}", fixture.task_id))
        .add_header("Authorization", fixture.member.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .server
        .delete(&format!("/api/task/{}", fixture.task_id))
        .add_header("Authorization", fixture.admin.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    let task = task_entity::Entity::find_by_id(fixture.task_id)
        .one(app.db.as_ref())
        .await
        .unwrap();
    assert!(task.is_none());

    // 已删除的任务再次删除得到404
    let response = app
        .server
        .delete(&format!("/api/task/{}", fixture.task_id))
        .add_header("Authorization", fixture.admin.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "task not found!");
}

/// 测试变更任务活跃状态的权限矩阵
///
/// 被指派者或所有者/管理员可以切换，未被指派的普通成员
/// 和外部用户不行。
#[tokio::test]
async fn test_change_task_status_permissions() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;
    let payload = |active: bool| {
        json!({
            "board_id": fixture.board_id,
            "task_id": fixture.task_id,
            "status": active
        })
    };

    // 被指派的成员
    let response = app
        .server
        .post("/api/change-task-status")
        .add_header("Authorization", fixture.assignee.bearer())
        .json(&payload(false))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["isActive"], false);

    let history = history_entity::Entity::find()
        .filter(history_entity::Column::TaskId.eq(fixture.task_id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(
        history[0].action,
        "ava@example.com changed task status to inactive"
    );

    // 未被指派的普通成员
    let response = app
        .server
        .post("/api/change-task-status")
        .add_header("Authorization", fixture.member.bearer())
        .json(&payload(true))
        .await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

    // 管理员无需被指派
    let response = app
        .server
        .post("/api/change-task-status")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&payload(true))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["isActive"], true);

    // 请求中给出的看板不存在，等同于无任何关系
    let response = app
        .server
        .post("/api/change-task-status")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({
            "board_id": 9999,
            "task_id": fixture.task_id,
            "status": true
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

/// 测试变更任务活跃状态的校验错误
#[tokio::test]
async fn test_change_task_status_validation() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    let response = app
        .server
        .post("/api/change-task-status")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "message": "Bad request",
            "errors": {
                "board_id": ["The board id field is required."],
                "status": ["The status field is required."],
                "task_id": ["The task id field is required."]
            }
        })
    );

    let response = app
        .server
        .post("/api/change-task-status")
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({
            "board_id": fixture.board_id,
            "task_id": 9999,
            "status": true
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"]["task_id"][0], "The selected task id is invalid.");
}

/// 测试任务历史端点的响应信封与访问控制
#[tokio::test]
async fn test_task_history_endpoint() {
    let app = create_test_app().await;
    let fixture = seed_standard_board(&app.db).await;

    // 制造两条历史
    app.server
        .put(&format!("/api/update-task/{}", fixture.task_id))
        .add_header("Authorization", fixture.admin.bearer())
        .json(&json!({ "name": "Renamed" }))
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

    let response = app
        .server
        .get(&format!("/api/task-history/{}", fixture.task_id))
        .add_header("Authorization", fixture.member.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["lastPage"], 1);
    assert_eq!(body["hasMorePages"], false);
    let entries = body["task_history"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    // 最新的排在最前
    assert_eq!(
        entries[0]["action"],
        "ava@example.com changed task status to inactive"
    );
    assert_eq!(
        entries[1]["action"],
        "adam@example.com changed task name from Initial task to Renamed"
    );

    // 外部用户不可见
    let response = app
        .server
        .get(&format!("/api/task-history/{}", fixture.task_id))
        .add_header("Authorization", fixture.outsider.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

    // 不存在的任务
    let response = app
        .server
        .get("/api/task-history/9999")
        .add_header("Authorization", fixture.member.bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "task not found!");
}
