//! Property-based testing strategies

use proptest::prelude::*;
use task_core::{NewTask, UpdateTask};

/// Any non-empty title, whitespace included
pub fn title_strategy() -> impl Strategy<Value = String> {
    "[ a-zA-Z0-9áéíóúñ.,!?-]{1,80}"
}

/// Optional description
pub fn description_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[ a-zA-Z0-9.,]{0,200}")
}

/// Valid NewTask
pub fn new_task_strategy() -> impl Strategy<Value = NewTask> {
    (title_strategy(), description_strategy())
        .prop_map(|(title, description)| NewTask::new(title, description))
}

/// Valid partial update; any subset of fields may be present
pub fn update_task_strategy() -> impl Strategy<Value = UpdateTask> {
    (
        proptest::option::of(title_strategy()),
        proptest::option::of(description_strategy()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(title, description, completed)| UpdateTask {
            title,
            description,
            completed,
        })
}
