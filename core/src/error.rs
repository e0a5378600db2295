use std::fmt::Display;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskError>;

/// Failures raised by the task store and its callers.
///
/// ```rust
/// use task_core::error::TaskError;
///
/// let missing = TaskError::not_found_id("7f0c");
/// assert!(missing.is_not_found());
/// assert_eq!(missing.status_code(), 404);
///
/// assert_eq!(TaskError::empty_field("title").status_code(), 400);
/// assert_eq!(TaskError::InvalidId("12345".into()).status_code(), 500);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// No task carries the requested id
    #[error("{0}")]
    NotFound(String),

    /// Rejected input; the message is shown to the client
    #[error("{0}")]
    Validation(String),

    /// The id is not something the store can look up
    #[error("malformed task id '{0}'")]
    InvalidId(String),

    #[error("store failure: {0}")]
    Database(String),

    /// The store could not be opened with the given settings
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl TaskError {
    pub fn not_found_id(id: impl Display) -> Self {
        Self::NotFound(format!("Task with ID {id} not found"))
    }

    pub fn empty_field(field: &str) -> Self {
        Self::Validation(format!("Field '{field}' cannot be empty"))
    }

    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Field '{field}' is required"))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True for failures raised while talking to the store, malformed ids included
    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database(_) | Self::InvalidId(_))
    }

    /// HTTP status the API answers with. A malformed id counts as a store failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::InvalidId(_) | Self::Database(_) | Self::Configuration(_) => 500,
        }
    }
}
