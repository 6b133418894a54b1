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

use crate::domain::models::user::User;
use crate::infrastructure::database::entities::api_token;
use crate::infrastructure::database::entities::user as user_entity;
use crate::presentation::errors::INTERNAL_ERROR_MESSAGE;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// 数据库连接
    pub db: Arc<DatabaseConnection>,
}

/// 计算持有者令牌的存储摘要
///
/// 数据库中只保存令牌的 SHA-256 十六进制摘要，校验时对
/// 请求携带的明文令牌做同样的计算再比对。
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// 认证中间件
///
/// 校验 `Authorization: Bearer <token>` 请求头并将对应的
/// 用户注入请求扩展，后续处理器通过 `Extension<User>` 获取
/// 当前用户。
///
/// # 参数
///
/// * `state` - 认证状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err((StatusCode, Json))` - 认证失败的状态码与消息体
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(unauthenticated)?;

    let digest = token_digest(token);

    let token_row = api_token::Entity::find()
        .filter(api_token::Column::TokenHash.eq(&digest))
        .one(state.db.as_ref())
        .await
        .map_err(internal_error)?;

    let Some(token_row) = token_row else {
        tracing::warn!("rejected request carrying an unknown API token");
        return Err(unauthenticated());
    };

    let user = user_entity::Entity::find_by_id(token_row.user_id)
        .one(state.db.as_ref())
        .await
        .map_err(internal_error)?;

    let Some(user) = user else {
        tracing::warn!("API token {} references a missing user", token_row.id);
        return Err(unauthenticated());
    };

    req.extensions_mut().insert(User {
        id: user.id,
        name: user.name,
        email: user.email,
    });

    Ok(next.run(req).await)
}

fn unauthenticated() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthenticated." })),
    )
}

fn internal_error(err: DbErr) -> (StatusCode, Json<Value>) {
    tracing::error!("database error during authentication: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": INTERNAL_ERROR_MESSAGE })),
    )
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
