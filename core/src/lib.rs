//! Domain layer of the task service
//!
//! Holds the task record and its write DTOs, the list filter, the
//! [`TaskRepository`] contract that storage backends implement, and the
//! validation rules applied before anything reaches a store.
//!
//! ```rust
//! use task_core::{NewTask, TaskFilter, TaskValidator};
//!
//! let new_task = NewTask::new("Buy milk", None);
//! assert!(TaskValidator::validate_new_task(&new_task).is_ok());
//!
//! let pending = TaskFilter::from_completed_param(Some("false"));
//! assert_eq!(pending.completed, Some(false));
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

pub use error::{Result, TaskError};
pub use models::{NewTask, Task, TaskFilter, TaskId, UpdateTask};
pub use repository::TaskRepository;
pub use validation::TaskValidator;
