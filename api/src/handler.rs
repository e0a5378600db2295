//! Task Handler
//!
//! Implements the six task operations against a [`TaskRepository`]. Each
//! method returns a domain result; the router turns it into a response.

use std::sync::Arc;
use task_core::{
    error::Result, NewTask, Task, TaskError, TaskFilter, TaskId, TaskRepository, UpdateTask,
    TaskValidator,
};

use crate::dto::CreateTaskRequest;

/// Bridges HTTP requests with a TaskRepository
pub struct TaskHandler<R> {
    repository: Arc<R>,
}

impl<R> Clone for TaskHandler<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

impl<R> TaskHandler<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Get a clone of the repository Arc
    pub fn repository(&self) -> Arc<R> {
        self.repository.clone()
    }
}

impl<R: TaskRepository> TaskHandler<R> {
    /// Create a task. Rejects a missing or empty title on its own,
    /// independently of route validation.
    pub async fn create_task(&self, request: CreateTaskRequest) -> Result<Task> {
        let title = match request.title {
            Some(title) if !title.is_empty() => title,
            _ => return Err(TaskError::missing_field("title")),
        };
        let new_task = NewTask::new(title, request.description);
        TaskValidator::validate_new_task(&new_task)?;

        let task = self.repository.create(new_task).await?;
        tracing::info!(task_id = %task.id, "Task created");
        Ok(task)
    }

    /// List tasks in creation order
    pub async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        self.repository.find_many(filter).await
    }

    pub async fn get_task(&self, id: &str) -> Result<Task> {
        let id: TaskId = id.parse()?;
        self.repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| TaskError::not_found_id(id))
    }

    /// Apply a partial update; omitted fields keep their values
    pub async fn update_task(&self, id: &str, updates: UpdateTask) -> Result<Task> {
        let id: TaskId = id.parse()?;
        TaskValidator::validate_update(&updates)?;

        let task = self
            .repository
            .find_by_id_and_update(&id, updates)
            .await?
            .ok_or_else(|| TaskError::not_found_id(id))?;
        tracing::info!(task_id = %task.id, "Task updated");
        Ok(task)
    }

    /// Delete a task, returning the removed record
    pub async fn delete_task(&self, id: &str) -> Result<Task> {
        let id: TaskId = id.parse()?;
        let task = self
            .repository
            .find_by_id_and_delete(&id)
            .await?
            .ok_or_else(|| TaskError::not_found_id(id))?;
        tracing::info!(task_id = %task.id, "Task deleted");
        Ok(task)
    }

    /// Flip `completed`.
    ///
    /// Read then write, without a transaction: two concurrent toggles of the
    /// same task may lose one flip.
    pub async fn toggle_task(&self, id: &str) -> Result<Task> {
        let id: TaskId = id.parse()?;
        let current = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| TaskError::not_found_id(id))?;

        let task = self
            .repository
            .find_by_id_and_update(&id, UpdateTask::completed(!current.completed))
            .await?
            .ok_or_else(|| TaskError::not_found_id(id))?;
        tracing::info!(task_id = %task.id, completed = task.completed, "Task toggled");
        Ok(task)
    }

    pub async fn health_check(&self) -> Result<()> {
        self.repository.health_check().await
    }
}
