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

use boardrs::config::settings::Settings;
use boardrs::domain::services::role_service::RoleService;
use boardrs::domain::services::task_service::TaskService;
use boardrs::infrastructure::database::connection;
use boardrs::infrastructure::repositories::archive_repo_impl::ArchiveRepositoryImpl;
use boardrs::infrastructure::repositories::board_repo_impl::BoardRepositoryImpl;
use boardrs::infrastructure::repositories::history_repo_impl::HistoryRepositoryImpl;
use boardrs::infrastructure::repositories::status_repo_impl::StatusRepositoryImpl;
use boardrs::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use boardrs::presentation::routes;
use boardrs::utils::telemetry;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting boardrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Wire repositories and services
    let boards = Arc::new(BoardRepositoryImpl::new(db.clone()));
    let statuses = Arc::new(StatusRepositoryImpl::new(db.clone()));
    let tasks = Arc::new(TaskRepositoryImpl::new(db.clone()));
    let history = Arc::new(HistoryRepositoryImpl::new(db.clone()));
    let archive = Arc::new(ArchiveRepositoryImpl::new(db.clone()));

    let task_service = Arc::new(TaskService::new(
        RoleService::new(boards),
        statuses,
        tasks,
        history,
        archive,
    ));

    // 5. Start HTTP server
    let app = routes::routes(db, task_service);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
