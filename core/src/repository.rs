use crate::{
    error::Result,
    models::{NewTask, Task, TaskFilter, TaskId, UpdateTask},
};
use async_trait::async_trait;

/// Repository trait for task persistence and retrieval operations
///
/// This is the store adapter every handler talks to. Each operation must be
/// atomic for a single task record; nothing spans more than one record.
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task
    ///
    /// # Arguments
    /// * `task` - The new task data to create
    ///
    /// # Returns
    /// * `Ok(Task)` - The stored task with generated ID, `completed = false`
    ///   and creation timestamp
    /// * `Err(TaskError::Validation)` - If the title is empty
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn create(&self, task: NewTask) -> Result<Task>;

    /// List tasks matching the given filter, in the store's natural order
    ///
    /// # Returns
    /// * `Ok(Vec<Task>)` - The matching tasks (may be empty)
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn find_many(&self, filter: TaskFilter) -> Result<Vec<Task>>;

    /// Get a task by its ID
    ///
    /// # Returns
    /// * `Ok(Some(Task))` - The task if found
    /// * `Ok(None)` - If no task exists with that ID
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>>;

    /// Apply a partial update and return the post-update state
    ///
    /// Fields left as `None` in `updates` are not touched.
    ///
    /// # Returns
    /// * `Ok(Some(Task))` - The updated task
    /// * `Ok(None)` - If no task exists with that ID
    /// * `Err(TaskError::Validation)` - If a supplied title is empty
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn find_by_id_and_update(&self, id: &TaskId, updates: UpdateTask)
        -> Result<Option<Task>>;

    /// Remove a task and return what was removed
    ///
    /// # Returns
    /// * `Ok(Some(Task))` - The deleted task
    /// * `Ok(None)` - If no task exists with that ID
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn find_by_id_and_delete(&self, id: &TaskId) -> Result<Option<Task>>;

    /// Get repository health status for monitoring
    ///
    /// # Returns
    /// * `Ok(())` - Repository is healthy and connected
    /// * `Err(TaskError::Database)` - Repository is unhealthy
    async fn health_check(&self) -> Result<()>;
}
