//! Task Server Library
//!
//! Configuration management, telemetry, database setup and server
//! initialization for the task management HTTP service.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{
    create_repository, create_server, ensure_database_directory, initialize_app, shutdown_signal,
};
pub use telemetry::init_telemetry;
