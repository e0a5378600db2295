//! End-to-end tests of the router against the in-memory repository

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use mocks::MockTaskRepository;
use serde_json::{json, Value};
use std::sync::Arc;
use task_api::{TaskServer, BANNER};
use task_core::TaskError;
use tower::ServiceExt;

fn app() -> (Router, Arc<MockTaskRepository>) {
    let repo = Arc::new(MockTaskRepository::new());
    let router = TaskServer::new(repo.clone(), "/api").into_router();
    (router, repo)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn create(app: &Router, title: &str) -> Value {
    let (status, body) = send(app, "POST", "/api/tasks", Some(json!({ "title": title }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn id_of(task: &Value) -> String {
    task["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_returns_new_task() {
    let (app, _repo) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({ "title": "Buy milk", "description": "2 liters" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["description"], "2 liters");
    assert_eq!(body["completed"], false);
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_stamps_request_time() {
    let (app, _repo) = app();
    let before = Utc::now();

    let body = create(&app, "Buy milk").await;
    let created_at = DateTime::parse_from_rfc3339(body["createdAt"].as_str().unwrap()).unwrap();

    assert!(created_at >= before);
    assert!(created_at <= Utc::now());
}

#[tokio::test]
async fn test_create_without_content_type_reports_missing_title() {
    let (app, repo) = app();

    let (status, body) = send(&app, "POST", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "title");
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_create_without_description_omits_it() {
    let (app, _repo) = app();
    let body = create(&app, "Buy milk").await;
    assert!(body.get("description").is_none());
}

#[tokio::test]
async fn test_create_ignores_client_supplied_completed() {
    let (app, _repo) = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({ "title": "Buy milk", "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["completed"], false);
}

#[tokio::test]
async fn test_create_rejects_missing_or_empty_title() {
    let (app, repo) = app();

    for payload in [json!({}), json!({ "title": "" }), json!({ "description": "x" })] {
        let (status, body) = send(&app, "POST", "/api/tasks", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "title");
        assert_eq!(body["errors"][0]["message"], "Title is required");
    }

    assert!(repo.is_empty());
    repo.assert_not_called("create");
}

#[tokio::test]
async fn test_create_accepts_whitespace_title() {
    let (app, _repo) = app();
    let body = create(&app, "   ").await;
    assert_eq!(body["title"], "   ");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (app, repo) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/tasks")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/api/tasks", Some(json!({ "title": 42 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_get_returns_current_state() {
    let (app, _repo) = app();
    let created = create(&app, "Buy milk").await;
    let id = id_of(&created);

    let (status, body) = send(&app, "GET", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    send(&app, "PATCH", &format!("/api/tasks/{id}/toggle"), None).await;
    let (_, body) = send(&app, "GET", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(body["completed"], true);
}

#[tokio::test]
async fn test_unknown_id_is_not_found_for_every_operation() {
    let (app, _repo) = app();
    let id = "0b6f9d5e-3f1a-4c57-9a57-1c2f0e3d4b5a";

    let cases = [
        ("GET", format!("/api/tasks/{id}"), None),
        ("PUT", format!("/api/tasks/{id}"), Some(json!({ "title": "x" }))),
        ("DELETE", format!("/api/tasks/{id}"), None),
        ("PATCH", format!("/api/tasks/{id}/toggle"), None),
    ];

    for (method, uri, body) in cases {
        let (status, body) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body["error"], "Task not found");
    }
}

#[tokio::test]
async fn test_malformed_id_is_a_server_error() {
    let (app, _repo) = app();

    let (status, body) = send(&app, "GET", "/api/tasks/12345", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error fetching task");

    let (status, body) = send(&app, "PATCH", "/api/tasks/12345/toggle", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error toggling task status");
}

#[tokio::test]
async fn test_list_in_creation_order() {
    let (app, _repo) = app();
    for title in ["first", "second", "third"] {
        create(&app, title).await;
    }

    let (status, body) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_list_empty_store() {
    let (app, _repo) = app();
    let (status, body) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_completed_filter_quirk() {
    let (app, _repo) = app();
    let done = create(&app, "done").await;
    create(&app, "open").await;
    send(&app, "PATCH", &format!("/api/tasks/{}/toggle", id_of(&done)), None).await;

    let count = |body: &Value| body.as_array().unwrap().len();

    let (_, body) = send(&app, "GET", "/api/tasks?completed=true", None).await;
    assert_eq!(count(&body), 1);
    assert_eq!(body[0]["title"], "done");

    let (_, body) = send(&app, "GET", "/api/tasks?completed=false", None).await;
    assert_eq!(count(&body), 1);
    assert_eq!(body[0]["title"], "open");

    // Anything but the exact string "true" selects incomplete tasks
    let (_, body) = send(&app, "GET", "/api/tasks?completed=TRUE", None).await;
    assert_eq!(count(&body), 1);
    assert_eq!(body[0]["title"], "open");

    let (_, body) = send(&app, "GET", "/api/tasks?completed=", None).await;
    assert_eq!(count(&body), 2);
}

#[tokio::test]
async fn test_list_repeated_completed_key_selects_pending() {
    let (app, _repo) = app();
    let done = create(&app, "done").await;
    create(&app, "open").await;
    send(&app, "PATCH", &format!("/api/tasks/{}/toggle", id_of(&done)), None).await;

    for uri in [
        "/api/tasks?completed=true&completed=false",
        "/api/tasks?completed=true&completed=true",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body.as_array().unwrap().len(), 1, "{uri}");
        assert_eq!(body[0]["title"], "open", "{uri}");
    }

    let (status, body) = send(&app, "GET", "/api/tasks?page=2&completed=true", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "done");
}

#[tokio::test]
async fn test_list_count_tracks_creates_and_deletes() {
    let (app, _repo) = app();
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(id_of(&create(&app, &format!("task {i}")).await));
    }
    for id in &ids[..2] {
        let (status, _) = send(&app, "DELETE", &format!("/api/tasks/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_applies_partial_changes() {
    let (app, _repo) = app();
    let (_, created) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({ "title": "Buy milk", "description": "2 liters" })),
    )
    .await;
    let id = id_of(&created);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/tasks/{id}"),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["description"], "2 liters");
    assert_eq!(body["completed"], true);
    assert_eq!(body["createdAt"], created["createdAt"]);

    let (_, body) = send(
        &app,
        "PUT",
        &format!("/api/tasks/{id}"),
        Some(json!({ "title": "Buy oat milk", "description": null })),
    )
    .await;
    assert_eq!(body["title"], "Buy oat milk");
    assert!(body.get("description").is_none());
    assert_eq!(body["completed"], true);
}

#[tokio::test]
async fn test_update_with_empty_body_is_a_no_op() {
    let (app, _repo) = app();
    let created = create(&app, "Buy milk").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/tasks/{}", id_of(&created)),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_update_rejects_empty_title_and_keeps_record() {
    let (app, _repo) = app();
    let created = create(&app, "Buy milk").await;
    let uri = format!("/api/tasks/{}", id_of(&created));

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "Title cannot be empty");

    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_update_rejects_null_title_and_keeps_record() {
    let (app, repo) = app();
    let created = create(&app, "Buy milk").await;
    let uri = format!("/api/tasks/{}", id_of(&created));

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "title": null }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "title");
    assert_eq!(body["errors"][0]["message"], "Title cannot be empty");
    repo.assert_not_called("find_by_id_and_update");

    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_update_without_content_type_is_a_no_op() {
    let (app, _repo) = app();
    let created = create(&app, "Buy milk").await;
    let uri = format!("/api/tasks/{}", id_of(&created));

    let (status, body) = send(&app, "PUT", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let unknown = "/api/tasks/0b6f9d5e-3f1a-4c57-9a57-1c2f0e3d4b5a";
    let (status, body) = send(&app, "PUT", unknown, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task not found");
}

#[tokio::test]
async fn test_toggle_twice_restores_state() {
    let (app, _repo) = app();
    let created = create(&app, "Buy milk").await;
    let uri = format!("/api/tasks/{}/toggle", id_of(&created));

    let (status, body) = send(&app, "PATCH", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], true);

    let (_, body) = send(&app, "PATCH", &uri, None).await;
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_delete_then_gone() {
    let (app, _repo) = app();
    let created = create(&app, "Buy milk").await;
    let uri = format!("/api/tasks/{}", id_of(&created));

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Task deleted successfully" }));

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_hides_detail() {
    let (app, repo) = app();

    repo.inject_error(TaskError::Database("disk I/O error at /var/db".to_string()));
    let (status, body) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Error fetching tasks" }));

    repo.inject_error(TaskError::Database("constraint".to_string()));
    let (status, body) = send(&app, "POST", "/api/tasks", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error creating task");
}

#[tokio::test]
async fn test_banner_and_health() {
    let (app, repo) = app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String(BANNER.to_string()));

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    repo.inject_error_on("health_check", TaskError::Database("down".to_string()));
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn test_custom_base_path() {
    let repo = Arc::new(MockTaskRepository::new());
    let app = TaskServer::new(repo, "/v2/").into_router();

    let (status, _) = send(&app, "GET", "/v2/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
