//! Request and response bodies

use serde::{Deserialize, Serialize};
use task_core::{models::deserialize_present, TaskFilter, UpdateTask};

use crate::error::FieldError;
use crate::validation::ValidateRequest;

/// Body of `POST /tasks`
///
/// `title` is optional at the type level so that a missing title surfaces
/// as a field error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTaskRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }
}

impl ValidateRequest for CreateTaskRequest {
    fn validate(&self) -> Vec<FieldError> {
        match self.title.as_deref() {
            None | Some("") => vec![FieldError::new("title", "Title is required")],
            Some(_) => Vec::new(),
        }
    }
}

/// Body of `PUT /tasks/:id`
///
/// Both text fields keep an explicit `null` apart from an absent key, so a
/// `null` title is caught by the same rule as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl ValidateRequest for UpdateTaskRequest {
    fn validate(&self) -> Vec<FieldError> {
        match &self.title {
            Some(None) => vec![FieldError::new("title", "Title cannot be empty")],
            Some(Some(title)) if title.is_empty() => {
                vec![FieldError::new("title", "Title cannot be empty")]
            }
            _ => Vec::new(),
        }
    }
}

/// A `null` title becomes an empty one so handler-level checks reject it as well
impl From<UpdateTaskRequest> for UpdateTask {
    fn from(request: UpdateTaskRequest) -> Self {
        Self {
            title: request.title.map(Option::unwrap_or_default),
            description: request.description,
            completed: request.completed,
        }
    }
}

/// Query string of `GET /tasks`
///
/// Held as raw pairs so that repeated keys never fail extraction; see
/// [`TaskFilter::from_completed_values`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ListTasksQuery(pub Vec<(String, String)>);

impl ListTasksQuery {
    pub fn filter(&self) -> TaskFilter {
        let values: Vec<&str> = self
            .0
            .iter()
            .filter(|(key, _)| key == "completed")
            .map(|(_, value)| value.as_str())
            .collect();
        TaskFilter::from_completed_values(&values)
    }
}

/// Confirmation body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
