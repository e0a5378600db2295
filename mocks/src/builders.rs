//! Fluent builders for tasks and their write DTOs

use chrono::Utc;
use task_core::{Task, TaskId, UpdateTask};

/// Persisted task with overridable fields
pub struct TaskBuilder {
    task: Task,
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBuilder {
    /// Create new builder with default values
    pub fn new() -> Self {
        Self {
            task: Task {
                id: TaskId::generate(),
                title: "Test Task".to_string(),
                description: Some("A test task".to_string()),
                completed: false,
                created_at: Utc::now(),
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.task.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.task.description = Some(description.into());
        self
    }

    pub fn without_description(mut self) -> Self {
        self.task.description = None;
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.task.completed = completed;
        self
    }

    /// Build the final Task
    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for UpdateTask instances
#[derive(Default)]
pub struct UpdateTaskBuilder {
    update: UpdateTask,
}

impl UpdateTaskBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.update.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.update.description = Some(Some(description.into()));
        self
    }

    /// Explicitly clear the description
    pub fn clear_description(mut self) -> Self {
        self.update.description = Some(None);
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.update.completed = Some(completed);
        self
    }

    pub fn build(self) -> UpdateTask {
        self.update
    }
}
