//! Task HTTP API
//!
//! JSON over HTTP for the task resource. The crate bridges a
//! [`task_core::TaskRepository`] with axum:
//!
//! - route table and server lifecycle ([`TaskServer`])
//! - declarative body validation ([`ValidatedJson`])
//! - per-operation logic ([`TaskHandler`])
//! - error mapping to status codes and JSON bodies ([`ApiError`])
//!
//! # Usage
//!
//! ```no_run
//! use mocks::MockTaskRepository;
//! use std::sync::Arc;
//! use task_api::TaskServer;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = Arc::new(MockTaskRepository::new());
//! let server = TaskServer::new(repository, "/api");
//! server
//!     .serve("127.0.0.1:5000", async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod dto;
pub mod error;
pub mod handler;
pub mod request_logger;
pub mod server;
pub mod validation;

pub use dto::{CreateTaskRequest, ListTasksQuery, MessageResponse, UpdateTaskRequest};
pub use error::{ApiError, ApiResult, FieldError, Operation};
pub use handler::TaskHandler;
pub use server::{ApiState, TaskServer, BANNER};
pub use validation::{ValidateRequest, ValidatedJson};
