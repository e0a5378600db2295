//! Standard test fixtures for consistent testing

use crate::builders::TaskBuilder;
use task_core::{NewTask, Task};

/// Create `count` tasks; every third one is completed
pub fn create_test_tasks(count: usize) -> Vec<Task> {
    (1..=count)
        .map(|i| {
            TaskBuilder::new()
                .with_title(format!("Test Task {i}"))
                .with_description(format!("Test task number {i} for bulk testing"))
                .completed(i % 3 == 0)
                .build()
        })
        .collect()
}

/// Standard NewTask with a description
pub fn create_new_task() -> NewTask {
    NewTask::new("Buy milk", Some("Two liters, semi-skimmed".to_string()))
}
