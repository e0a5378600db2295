use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::TaskError;

/// Opaque task identifier assigned by the store on creation.
///
/// Rendered on the wire as a lowercase hyphenated UUID string. Parsing any
/// other string fails with [`TaskError::InvalidId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TaskId {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TaskError::InvalidId(s.to_string()))
    }
}

/// A persisted to-do item.
///
/// # Examples
///
/// ```rust
/// use task_core::models::{Task, TaskId};
/// use chrono::Utc;
///
/// let task = Task {
///     id: TaskId::generate(),
///     title: "Buy milk".to_string(),
///     description: None,
///     completed: false,
///     created_at: Utc::now(),
/// };
///
/// let toggled = task.toggled();
/// assert!(toggled.completed);
/// assert_eq!(toggled.toggled(), task);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier, never changes
    pub id: TaskId,
    /// Non-empty title
    pub title: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Completion flag
    pub completed: bool,
    /// Creation timestamp, set once
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Return a copy with `completed` flipped
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Apply a partial update, leaving omitted fields untouched
    pub fn apply(&mut self, updates: &UpdateTask) {
        if let Some(title) = &updates.title {
            self.title = title.clone();
        }
        if let Some(description) = &updates.description {
            self.description = description.clone();
        }
        if let Some(completed) = updates.completed {
            self.completed = completed;
        }
    }
}

/// Data transfer object for creating new tasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTask {
    /// Task title
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }
}

/// Data transfer object for updating existing tasks
///
/// `description` distinguishes "absent" (`None`) from "explicitly null"
/// (`Some(None)`), which clears the stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UpdateTask {
    /// Optional new title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional new description
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    /// Optional new completion flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update that only sets the completion flag
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Wraps any present value (including `null`) in `Some`
///
/// Paired with `#[serde(default)]` on an `Option<Option<T>>` field, an
/// absent key stays `None` while an explicit `null` becomes `Some(None)`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Filter criteria for listing tasks.
///
/// An empty filter matches every task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Filter by completion flag
    pub completed: Option<bool>,
}

impl TaskFilter {
    /// Build a filter from the raw `completed` query parameter.
    ///
    /// Absent or empty means no filter. Only the literal `"true"` selects
    /// completed tasks; every other non-empty value, `"false"` included,
    /// selects pending ones.
    ///
    /// ```rust
    /// use task_core::models::TaskFilter;
    ///
    /// assert_eq!(TaskFilter::from_completed_param(None).completed, None);
    /// assert_eq!(TaskFilter::from_completed_param(Some("")).completed, None);
    /// assert_eq!(TaskFilter::from_completed_param(Some("true")).completed, Some(true));
    /// assert_eq!(TaskFilter::from_completed_param(Some("false")).completed, Some(false));
    /// assert_eq!(TaskFilter::from_completed_param(Some("TRUE")).completed, Some(false));
    /// ```
    pub fn from_completed_param(raw: Option<&str>) -> Self {
        let completed = match raw {
            None | Some("") => None,
            Some(value) => Some(value == "true"),
        };
        Self { completed }
    }

    /// Build a filter from every `completed` value in the query string.
    ///
    /// A repeated key arrives as a list, which never equals `"true"`, so it
    /// selects pending tasks.
    ///
    /// ```rust
    /// use task_core::models::TaskFilter;
    ///
    /// assert_eq!(TaskFilter::from_completed_values(&[]).completed, None);
    /// assert_eq!(TaskFilter::from_completed_values(&["true"]).completed, Some(true));
    /// assert_eq!(TaskFilter::from_completed_values(&["true", "true"]).completed, Some(false));
    /// ```
    pub fn from_completed_values(values: &[&str]) -> Self {
        match values {
            [] => Self::default(),
            [single] => Self::from_completed_param(Some(*single)),
            _ => Self {
                completed: Some(false),
            },
        }
    }

    /// Check a task against this filter
    pub fn matches(&self, task: &Task) -> bool {
        self.completed.map_or(true, |c| task.completed == c)
    }
}
