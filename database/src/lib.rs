//! Database crate for the task service
//!
//! This crate provides the SQLite implementation of the TaskRepository trait,
//! with connection pooling and embedded schema migrations.
//!
//! # Features
//!
//! - SQLite database support with WAL mode for file-backed databases
//! - Single-statement, per-task atomic operations (`RETURNING` clauses)
//! - Insertion-order listing
//! - In-memory databases for tests
//!
//! # Usage
//!
//! ```rust
//! use database::SqliteTaskRepository;
//! use task_core::repository::TaskRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create repository (in-memory for testing)
//!     let repo = SqliteTaskRepository::new(":memory:").await?;
//!
//!     // Run migrations
//!     repo.migrate().await?;
//!
//!     repo.health_check().await?;
//!     Ok(())
//! }
//! ```

mod common;
mod sqlite;

pub use sqlite::{PoolSettings, SqliteTaskRepository};

// Re-export commonly used types from task-core for convenience
pub use task_core::{
    error::{Result, TaskError},
    models::{NewTask, Task, TaskFilter, TaskId, UpdateTask},
    repository::TaskRepository,
};
