use crate::{
    error::{Result, TaskError},
    models::{NewTask, UpdateTask},
};

/// Validation utilities for task write operations
///
/// A title is valid when it is non-empty. Whitespace is not trimmed, so
/// `" "` is an acceptable title.
pub struct TaskValidator;

impl TaskValidator {
    /// Validate a task title
    ///
    /// # Returns
    /// * `Ok(())` - If the title is non-empty
    /// * `Err(TaskError::Validation)` - If the title is empty
    pub fn validate_title(title: &str) -> Result<()> {
        if title.is_empty() {
            return Err(TaskError::empty_field("title"));
        }
        Ok(())
    }

    /// Validate a complete NewTask structure
    pub fn validate_new_task(task: &NewTask) -> Result<()> {
        Self::validate_title(&task.title)
    }

    /// Validate an update; only a supplied title is checked
    pub fn validate_update(updates: &UpdateTask) -> Result<()> {
        match &updates.title {
            Some(title) => Self::validate_title(title),
            None => Ok(()),
        }
    }
}
