use anyhow::{Context, Result};
use config::{builder::DefaultState, Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Database file used when no URL is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite://tasks.sqlite";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Optional database URL. If not provided, defaults to ./tasks.sqlite
    pub url: Option<String>,
    /// Maximum number of database connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    pub listen_addr: String,
    /// Port number to listen on
    pub port: u16,
    /// Prefix for the task routes, e.g. `/api`
    pub base_path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl Config {
    fn defaults() -> config::ConfigBuilder<DefaultState> {
        ConfigBuilder::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// `TASKS_SERVER__PORT=8080` style overrides
    fn prefixed_env() -> Environment {
        Environment::with_prefix("TASKS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Load configuration from defaults, `CONFIG_FILE` and environment variables
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::defaults();

        if let Ok(config_file) = env::var("CONFIG_FILE") {
            builder = builder.add_source(
                File::with_name(&config_file)
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }

        let config = builder
            .add_source(Self::prefixed_env())
            .build()
            .context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        result.apply_standard_env_vars()?;

        Ok(result)
    }

    /// Load configuration from a specific file path, layered over the defaults
    pub fn from_file(path: &str) -> Result<Self> {
        let config = Self::defaults()
            .add_source(File::with_name(path).format(FileFormat::Toml))
            .add_source(Self::prefixed_env())
            .build()
            .with_context(|| format!("Failed to build configuration from file {path}"))?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration from file")
    }

    /// Apply DATABASE_URL, LISTEN_ADDR, PORT, LOG_LEVEL and BASE_PATH
    pub fn apply_standard_env_vars(&mut self) -> Result<()> {
        if let Ok(database_url) = env::var("DATABASE_URL") {
            self.database.url = Some(database_url);
        }

        if let Ok(listen_addr) = env::var("LISTEN_ADDR") {
            self.server.listen_addr = listen_addr;
        }

        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }

        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.logging.level = log_level;
        }

        if let Ok(base_path) = env::var("BASE_PATH") {
            self.server.base_path = base_path;
        }

        Ok(())
    }

    /// Get the database URL with default fallback
    pub fn database_url(&self) -> String {
        self.database
            .url
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }

    /// Get the server socket address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.listen_addr, self.server.port)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        let database_url = self.database_url();
        if !database_url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "Only SQLite databases are supported. URL must start with 'sqlite:'. Got: {}",
                database_url
            ));
        }

        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if !self.server.base_path.starts_with('/') {
            return Err(anyhow::anyhow!(
                "Base path must start with '/'. Got: {}",
                self.server.base_path
            ));
        }

        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!(
                "Database max_connections must be greater than 0"
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
            },
            server: ServerConfig {
                listen_addr: "0.0.0.0".to_string(),
                port: 5000,
                base_path: "/api".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.base_path, "/api");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        let config: Config = Config::defaults()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        let expected = Config::default();

        assert_eq!(config.database.url, expected.database.url);
        assert_eq!(config.server.port, expected.server.port);
        assert_eq!(config.server.base_path, expected.server.base_path);
        assert_eq!(config.server.listen_addr, expected.server.listen_addr);
        assert_eq!(config.logging.format, expected.logging.format);
    }

    #[test]
    fn test_database_url_with_default() {
        let config = Config::default();
        assert_eq!(config.database_url(), DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_database_url_with_custom() {
        let mut config = Config::default();
        config.database.url = Some("sqlite://custom.db".to_string());
        assert_eq!(config.database_url(), "sqlite://custom.db");
    }

    #[test]
    fn test_server_address() {
        let config = Config::default();
        assert_eq!(config.server_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.url = Some("postgres://localhost/tasks".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.url = Some("sqlite::memory:".to_string());
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.base_path = "api".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 8080\nbase_path = \"/v1\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.base_path, "/v1");
        assert_eq!(config.server.listen_addr, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_from_file_missing() {
        assert!(Config::from_file("/nonexistent/tasks-config.toml").is_err());
    }
}
