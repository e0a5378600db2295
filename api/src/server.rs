//! Route table and HTTP server
//!
//! Binds each verb and path to a handler. `POST` and `PUT` bodies pass
//! through [`ValidatedJson`] first.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use serde_json::json;
use std::{future::Future, net::SocketAddr, sync::Arc};
use task_core::{Task, TaskFilter, TaskRepository};
use tracing::{info, warn};

use crate::{
    dto::{CreateTaskRequest, ListTasksQuery, MessageResponse, UpdateTaskRequest},
    error::{during, ApiResult, Operation},
    handler::TaskHandler,
    validation::ValidatedJson,
};

/// Plain-text greeting served at `/`
pub const BANNER: &str =
    "Welcome to the task management API. Task routes live under the configured base path.";

/// Shared server state for handlers
pub struct ApiState<R> {
    pub handler: TaskHandler<R>,
}

/// HTTP server for the task resource
pub struct TaskServer<R> {
    handler: TaskHandler<R>,
    base_path: String,
}

impl<R: TaskRepository + 'static> TaskServer<R> {
    /// Create a server with task routes under `base_path` (e.g. `/api`)
    pub fn new(repository: Arc<R>, base_path: &str) -> Self {
        Self {
            handler: TaskHandler::new(repository),
            base_path: base_path.trim_end_matches('/').to_string(),
        }
    }

    /// Serve until `shutdown` resolves
    pub async fn serve<F>(self, addr: &str, shutdown: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("Invalid address '{addr}': {e}"))?;

        let app = self.into_router();
        let listener = tokio::net::TcpListener::bind(socket_addr).await?;
        info!("Task API listening on {}", socket_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }

    /// Build the router with all endpoints
    pub fn into_router(self) -> Router {
        let tasks = format!("{}/tasks", self.base_path);
        let task = format!("{tasks}/:id");
        let toggle = format!("{task}/toggle");

        let state = Arc::new(ApiState {
            handler: self.handler,
        });

        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler::<R>))
            .route(&tasks, get(list_tasks::<R>).post(create_task::<R>))
            .route(
                &task,
                get(get_task::<R>)
                    .put(update_task::<R>)
                    .delete(delete_task::<R>),
            )
            .route(&toggle, patch(toggle_task::<R>))
            .layer(middleware::from_fn(
                crate::request_logger::request_logging_middleware,
            ))
            .with_state(state)
    }
}

type SharedState<R> = State<Arc<ApiState<R>>>;

async fn root_handler() -> &'static str {
    BANNER
}

async fn health_handler<R: TaskRepository + 'static>(
    State(state): SharedState<R>,
) -> impl IntoResponse {
    match state.handler.health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "healthy" }))),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "error": e.to_string() })),
            )
        }
    }
}

async fn create_task<R: TaskRepository + 'static>(
    State(state): SharedState<R>,
    ValidatedJson(request): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state
        .handler
        .create_task(request)
        .await
        .map_err(during(Operation::Create))?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn list_tasks<R: TaskRepository + 'static>(
    State(state): SharedState<R>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Task>>> {
    // An unreadable query string lists everything
    let filter = match query {
        Ok(Query(query)) => query.filter(),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Ignoring unreadable query string");
            TaskFilter::default()
        }
    };
    let tasks = state
        .handler
        .list_tasks(filter)
        .await
        .map_err(during(Operation::List))?;
    Ok(Json(tasks))
}

async fn get_task<R: TaskRepository + 'static>(
    State(state): SharedState<R>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    let task = state
        .handler
        .get_task(&id)
        .await
        .map_err(during(Operation::Get))?;
    Ok(Json(task))
}

async fn update_task<R: TaskRepository + 'static>(
    State(state): SharedState<R>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = state
        .handler
        .update_task(&id, request.into())
        .await
        .map_err(during(Operation::Update))?;
    Ok(Json(task))
}

async fn delete_task<R: TaskRepository + 'static>(
    State(state): SharedState<R>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .handler
        .delete_task(&id)
        .await
        .map_err(during(Operation::Delete))?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

async fn toggle_task<R: TaskRepository + 'static>(
    State(state): SharedState<R>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    let task = state
        .handler
        .toggle_task(&id)
        .await
        .map_err(during(Operation::Toggle))?;
    Ok(Json(task))
}
