use anyhow::{Context, Result};
use clap::Parser;
use task_server::config::{Config, LogFormat};
use task_server::setup::{initialize_app, shutdown_signal};
use task_server::telemetry::{init_telemetry, log_startup_info, report_error};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "task-server")]
#[command(about = "Task management HTTP server")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Database URL override
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Listen address override
    #[arg(long, env = "LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Port override
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Base path for the task routes
    #[arg(long, env = "BASE_PATH")]
    base_path: Option<String>,

    /// Log level override
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format override
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(config_file) => Config::from_file(config_file)?,
        None => Config::from_env()?,
    };

    if let Some(ref database_url) = cli.database_url {
        config.database.url = Some(database_url.clone());
    }

    if let Some(ref listen_addr) = cli.listen_addr {
        config.server.listen_addr = listen_addr.clone();
    }

    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if let Some(ref base_path) = cli.base_path {
        config.server.base_path = base_path.clone();
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    if let Some(log_format) = cli.log_format {
        config.logging.format = log_format;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(&cli).context("Failed to load configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;

    if let Err(e) = config.validate() {
        error!(error = %e, "Configuration validation failed");
        std::process::exit(1);
    }

    log_startup_info(&config);

    let (server, repository) = match initialize_app(&config).await {
        Ok(app) => app,
        Err(e) => {
            report_error(&e, "startup");
            return Err(e);
        }
    };

    let addr = config.server_address();
    info!("Starting task server on {}", addr);

    let result = server.serve(&addr, shutdown_signal()).await;
    repository.close().await;

    match result {
        Ok(()) => {
            info!("Task server shut down cleanly");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Task server error");
            std::process::exit(3);
        }
    }
}
