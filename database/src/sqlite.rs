use crate::common::{build_filter_query, row_to_task, sqlx_error_to_task_error, TASK_COLUMNS};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;
use task_core::{
    error::{Result, TaskError},
    models::{NewTask, Task, TaskFilter, TaskId, UpdateTask},
    repository::TaskRepository,
    validation::TaskValidator,
};

/// Connection pool settings for [`SqliteTaskRepository`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of pooled connections (forced to 1 for in-memory databases)
    pub max_connections: u32,
    /// How long to wait for a free connection
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// SQLite implementation of the TaskRepository trait
///
/// Every operation is a single SQL statement, so each one is atomic for the
/// task it touches.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    /// Open a repository with default pool settings.
    ///
    /// Accepts `sqlite://path`, a bare file path, or `:memory:`. A missing
    /// database file is created.
    ///
    /// ```rust,no_run
    /// use database::SqliteTaskRepository;
    ///
    /// # async fn open() -> database::Result<()> {
    /// let scratch = SqliteTaskRepository::new(":memory:").await?;
    /// let on_disk = SqliteTaskRepository::new("sqlite:///var/lib/tasks/tasks.sqlite").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_settings(database_url, PoolSettings::default()).await
    }

    /// Create a new SQLite repository with explicit pool settings
    pub async fn with_settings(database_url: &str, settings: PoolSettings) -> Result<Self> {
        let in_memory = database_url.contains(":memory:");

        let connect_options = if in_memory {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(sqlx_error_to_task_error)?
                .journal_mode(SqliteJournalMode::Memory)
        } else {
            // Both `sqlite://path` and `sqlite:path` are accepted; a bare path gets a scheme
            let db_url = if database_url.starts_with("sqlite:") {
                database_url.to_string()
            } else {
                format!("sqlite://{database_url}")
            };
            tracing::info!(url = %db_url, "Opening SQLite database");

            SqliteConnectOptions::from_str(&db_url)
                .map_err(|e| {
                    TaskError::Configuration(format!("Invalid database URL '{database_url}': {e}"))
                })?
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };
        let connect_options = connect_options.busy_timeout(Duration::from_secs(5));

        // An in-memory database lives and dies with its single connection
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(settings.max_connections)
        };

        let pool = pool_options
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(connect_options)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(Self { pool })
    }

    /// Bring the schema up to date. Call once after opening.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| TaskError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Raw pool, for tests that need to run SQL directly
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task> {
        TaskValidator::validate_new_task(&task)?;

        let row = sqlx::query(&format!(
            "INSERT INTO tasks (id, title, description, completed, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {TASK_COLUMNS}"
        ))
        .bind(TaskId::generate().to_string())
        .bind(&task.title)
        .bind(&task.description)
        .bind(false)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(sqlx_error_to_task_error)?;

        row_to_task(&row)
    }

    async fn find_many(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let mut query_builder = build_filter_query(&filter);

        let rows = query_builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        tracing::debug!(?filter, count = rows.len(), "Listed tasks");

        rows.iter().map(row_to_task).collect()
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>> {
        let result = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        result.as_ref().map(row_to_task).transpose()
    }

    async fn find_by_id_and_update(
        &self,
        id: &TaskId,
        updates: UpdateTask,
    ) -> Result<Option<Task>> {
        TaskValidator::validate_update(&updates)?;

        if updates.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut query_builder: sqlx::QueryBuilder<sqlx::Sqlite> =
            sqlx::QueryBuilder::new("UPDATE tasks SET ");
        let mut assignments = query_builder.separated(", ");

        if let Some(title) = updates.title {
            assignments.push("title = ");
            assignments.push_bind_unseparated(title);
        }
        if let Some(description) = updates.description {
            assignments.push("description = ");
            assignments.push_bind_unseparated(description);
        }
        if let Some(completed) = updates.completed {
            assignments.push("completed = ");
            assignments.push_bind_unseparated(completed);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id.to_string());
        query_builder.push(format!(" RETURNING {TASK_COLUMNS}"));

        let result = query_builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        result.as_ref().map(row_to_task).transpose()
    }

    async fn find_by_id_and_delete(&self, id: &TaskId) -> Result<Option<Task>> {
        let result = sqlx::query(&format!(
            "DELETE FROM tasks WHERE id = ? RETURNING {TASK_COLUMNS}"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(sqlx_error_to_task_error)?;

        result.as_ref().map(row_to_task).transpose()
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(())
    }
}
