//! Mock implementation of TaskRepository trait
//!
//! Provides a thread-safe in-memory repository with:
//! - Error injection capabilities
//! - Call tracking for verification
//! - Insertion-order listing, like the SQLite store

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use task_core::{
    NewTask, Result, Task, TaskError, TaskFilter, TaskId, TaskRepository, TaskValidator,
    UpdateTask,
};

/// Pending injected failure, optionally bound to one method name
struct InjectedError {
    method: Option<String>,
    error: TaskError,
}

/// Mock implementation of TaskRepository for testing
///
/// Tasks are kept in a `Vec` so listing preserves insertion order.
pub struct MockTaskRepository {
    tasks: Arc<Mutex<Vec<Task>>>,
    error_injection: Arc<Mutex<Option<InjectedError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTaskRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Create mock repository with pre-populated tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(tasks)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inject error for the next operation, whichever it is
    pub fn inject_error(&self, error: TaskError) {
        *self.error_injection.lock() = Some(InjectedError {
            method: None,
            error,
        });
    }

    /// Inject error for the next call of a specific method
    pub fn inject_error_on(&self, method: &str, error: TaskError) {
        *self.error_injection.lock() = Some(InjectedError {
            method: Some(method.to_string()),
            error,
        });
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Snapshot of stored tasks in insertion order
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().clone()
    }

    /// Number of stored tasks
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Assert method was never called
    pub fn assert_not_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            !history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was called unexpectedly. Call history: {:?}",
            method,
            *history
        );
    }

    /// Record the call, then fail if an error is pending for it
    fn enter(&self, method: &str, params: &str) -> Result<()> {
        self.call_history.lock().push(format!("{method}({params})"));

        let mut injected = self.error_injection.lock();
        let applies = match injected.as_ref() {
            Some(pending) => pending.method.as_deref().map_or(true, |m| m == method),
            None => false,
        };
        if applies {
            if let Some(pending) = injected.take() {
                return Err(pending.error);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task> {
        self.enter("create", &format!("title={}", task.title))?;
        TaskValidator::validate_new_task(&task)?;

        let new_task = Task {
            id: TaskId::generate(),
            title: task.title,
            description: task.description,
            completed: false,
            created_at: Utc::now(),
        };

        self.tasks.lock().push(new_task.clone());
        Ok(new_task)
    }

    async fn find_many(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        self.enter("find_many", &format!("{filter:?}"))?;

        let tasks = self.tasks.lock();
        Ok(tasks.iter().filter(|t| filter.matches(t)).cloned().collect())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>> {
        self.enter("find_by_id", &format!("id={id}"))?;

        let tasks = self.tasks.lock();
        Ok(tasks.iter().find(|t| t.id == *id).cloned())
    }

    async fn find_by_id_and_update(
        &self,
        id: &TaskId,
        updates: UpdateTask,
    ) -> Result<Option<Task>> {
        self.enter("find_by_id_and_update", &format!("id={id}"))?;
        TaskValidator::validate_update(&updates)?;

        let mut tasks = self.tasks.lock();
        Ok(tasks.iter_mut().find(|t| t.id == *id).map(|task| {
            task.apply(&updates);
            task.clone()
        }))
    }

    async fn find_by_id_and_delete(&self, id: &TaskId) -> Result<Option<Task>> {
        self.enter("find_by_id_and_delete", &format!("id={id}"))?;

        let mut tasks = self.tasks.lock();
        let position = tasks.iter().position(|t| t.id == *id);
        Ok(position.map(|index| tasks.remove(index)))
    }

    async fn health_check(&self) -> Result<()> {
        self.enter("health_check", "")?;
        Ok(())
    }
}
