use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use task_core::{
    error::{Result, TaskError},
    models::{Task, TaskFilter, TaskId},
};

/// Column list shared by every statement that returns a task
pub const TASK_COLUMNS: &str = "id, title, description, completed, created_at";

/// Convert SQLite row to Task model
pub fn row_to_task(row: &SqliteRow) -> Result<Task> {
    let raw_id: String = row.try_get("id").map_err(sqlx_error_to_task_error)?;
    let id = raw_id
        .parse::<TaskId>()
        .map_err(|_| TaskError::Database(format!("Invalid task id in database: {raw_id}")))?;

    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(sqlx_error_to_task_error)?;

    Ok(Task {
        id,
        title: row.try_get("title").map_err(sqlx_error_to_task_error)?,
        description: row.try_get("description").map_err(sqlx_error_to_task_error)?,
        completed: row.try_get("completed").map_err(sqlx_error_to_task_error)?,
        created_at,
    })
}

/// Convert SQLx error to TaskError
pub fn sqlx_error_to_task_error(err: sqlx::Error) -> TaskError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            if message.contains("CHECK constraint failed") && message.contains("title") {
                TaskError::empty_field("title")
            } else {
                TaskError::Database(format!("Database constraint error: {message}"))
            }
        }
        sqlx::Error::RowNotFound => {
            // Absence is reported as Ok(None) by the repository, never as this error
            TaskError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => TaskError::Database("Connection pool timeout".to_string()),
        sqlx::Error::Io(io_err) => TaskError::Database(format!("Database I/O error: {io_err}")),
        _ => TaskError::Database(format!("Database operation failed: {err}")),
    }
}

/// Build the list query for a filter. Rows come back in insertion order.
pub fn build_filter_query(filter: &TaskFilter) -> sqlx::QueryBuilder<'static, sqlx::Sqlite> {
    let mut query_builder: sqlx::QueryBuilder<sqlx::Sqlite> =
        sqlx::QueryBuilder::new(format!("SELECT {TASK_COLUMNS} FROM tasks"));

    if let Some(completed) = filter.completed {
        query_builder.push(" WHERE completed = ");
        query_builder.push_bind(completed);
    }

    query_builder.push(" ORDER BY rowid ASC");

    query_builder
}
