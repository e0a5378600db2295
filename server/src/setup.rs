use anyhow::{Context, Result};
use database::{PoolSettings, SqliteTaskRepository};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use task_api::TaskServer;
use tracing::{error, info};

use crate::config::Config;

/// Create the SQLite task repository and bring its schema up to date
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteTaskRepository>> {
    let database_url = config.database_url();
    info!("Initializing SQLite repository at: {}", database_url);

    let settings = PoolSettings {
        max_connections: config.database.max_connections,
        acquire_timeout: Duration::from_secs(config.database.connection_timeout),
    };
    let repo = SqliteTaskRepository::with_settings(&database_url, settings)
        .await
        .context("Failed to create SQLite repository")?;

    info!("Running database migrations");
    repo.migrate()
        .await
        .context("Failed to run database migrations")?;

    info!("Task repository created successfully");
    Ok(Arc::new(repo))
}

/// Create the HTTP server for a repository
pub fn create_server(
    repository: Arc<SqliteTaskRepository>,
    config: &Config,
) -> TaskServer<SqliteTaskRepository> {
    info!(base_path = %config.server.base_path, "Creating task server");
    TaskServer::new(repository, &config.server.base_path)
}

/// Initialize the complete application
///
/// Returns the server together with the repository so the caller can close
/// the pool after shutdown.
pub async fn initialize_app(
    config: &Config,
) -> Result<(TaskServer<SqliteTaskRepository>, Arc<SqliteTaskRepository>)> {
    ensure_database_directory(&config.database_url())
        .context("Failed to create database directory")?;

    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;
    let server = create_server(repository.clone(), config);

    info!("Application initialized successfully");
    Ok((server, repository))
}

/// File path named by a SQLite URL, without scheme or query parameters
fn database_file(database_url: &str) -> Option<&str> {
    if database_url.contains(":memory:") {
        return None;
    }
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);
    (!path.is_empty()).then_some(path)
}

/// Ensure the parent directory of a file-backed database exists
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    if let Some(db_path) = database_file(database_url) {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating database directory: {}", parent.display());
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
        }
    }
    Ok(())
}

/// Resolves on SIGINT or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to register SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
