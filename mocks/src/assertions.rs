//! Custom assertion helpers for testing

use task_core::{NewTask, Task};

/// Assert tasks are equal ignoring timestamps
pub fn assert_task_equals(actual: &Task, expected: &Task) {
    assert_eq!(actual.id, expected.id, "Task IDs don't match");
    assert_eq!(actual.title, expected.title, "Task titles don't match");
    assert_eq!(
        actual.description, expected.description,
        "Task descriptions don't match"
    );
    assert_eq!(
        actual.completed, expected.completed,
        "Task completion flags don't match"
    );
}

/// Assert a freshly created task reflects its input and creation defaults
pub fn assert_created_from(task: &Task, input: &NewTask) {
    assert_eq!(task.title, input.title, "Created task should preserve title");
    assert_eq!(
        task.description, input.description,
        "Created task should preserve description"
    );
    assert!(!task.completed, "New task should not be completed");
}

/// Assert every task in the list has the given completion flag
pub fn assert_all_completed(tasks: &[Task], completed: bool) {
    for task in tasks {
        assert_eq!(
            task.completed, completed,
            "Task '{}' has completed={}, expected {}",
            task.title, task.completed, completed
        );
    }
}

/// Assert tasks are in creation order (oldest first)
pub fn assert_tasks_in_creation_order(tasks: &[Task]) {
    for window in tasks.windows(2) {
        assert!(
            window[0].created_at <= window[1].created_at,
            "Tasks are not in creation order. '{}' ({}) comes before '{}' ({})",
            window[0].title,
            window[0].created_at,
            window[1].title,
            window[1].created_at
        );
    }
}
