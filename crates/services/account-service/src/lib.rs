//! Account Service Library
//!
//! User registration, lookup and partial update over a JSON HTTP API.
//! Usernames and emails are unique and passwords are stored only as hashes.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use domain::Argon2Hasher;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::AccountServiceConfig;
use crate::infra::Database;

/// Run the account service, overriding the configured bind address when given.
pub async fn run_embedded(
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AccountServiceConfig::from_env();
    if let Some(host) = host {
        config.service.host = host;
    }
    if let Some(port) = port {
        config.service.port = port;
    }

    run_server_with_config(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AccountServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

async fn run_server_with_config(
    config: AccountServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(service = %config.service.service_name, "Starting server...");

    let database = Arc::new(Database::connect(&config.database).await?);

    let state = AppState::from_database(database, Arc::new(Argon2Hasher::new()));
    let app = create_router(state);

    let addr: SocketAddr = config.service.addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Account service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
