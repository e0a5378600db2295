//! Error handling for the HTTP API
//!
//! Maps task errors to status codes and JSON bodies. Store failures are
//! logged with their detail and answered with a generic message.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use task_core::TaskError;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// One failed declarative validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// The operation a request was performing, used for generic failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
    Toggle,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Error creating task",
            Operation::List => "Error fetching tasks",
            Operation::Get => "Error fetching task",
            Operation::Update => "Error updating task",
            Operation::Delete => "Error deleting task",
            Operation::Toggle => "Error toggling task status",
        }
    }
}

/// HTTP API errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Declarative route validation failed
    #[error("Invalid fields: {0:?}")]
    InvalidFields(Vec<FieldError>),

    /// Handler-level validation failed
    #[error("{0}")]
    Validation(String),

    #[error("Task not found")]
    NotFound,

    /// Any store failure; the detail stays in the logs
    #[error("{message}")]
    Internal {
        message: &'static str,
        detail: String,
    },
}

impl ApiError {
    /// Convert a task error raised while performing `operation`
    pub fn from_task_error(err: TaskError, operation: Operation) -> Self {
        match err {
            TaskError::NotFound(_) => ApiError::NotFound,
            TaskError::Validation(msg) => ApiError::Validation(msg),
            other => {
                tracing::error!(error = %other, ?operation, "Task store failure");
                ApiError::Internal {
                    message: operation.failure_message(),
                    detail: other.to_string(),
                }
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidFields(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed bodies and wrongly typed fields are validation failures
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::InvalidFields(errors) => json!({ "errors": errors }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Shorthand for `map_err` at handler boundaries
pub fn during(operation: Operation) -> impl FnOnce(TaskError) -> ApiError {
    move |err| ApiError::from_task_error(err, operation)
}
