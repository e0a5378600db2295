//! Contract test helpers for validating TaskRepository implementations
//!
//! Any store that backs the task service should pass this suite. The checks
//! only rely on tasks they create themselves, so they can share a repository.

use crate::{
    assert_all_completed, assert_created_from, assert_tasks_in_creation_order, create_new_task,
    UpdateTaskBuilder,
};
use task_core::{NewTask, TaskFilter, TaskId, TaskRepository, UpdateTask};

/// Test any TaskRepository implementation with the full contract
pub async fn test_repository_contract<R: TaskRepository>(repo: &R) {
    test_health_check_contract(repo).await;
    test_create_contract(repo).await;
    test_find_by_id_contract(repo).await;
    test_update_contract(repo).await;
    test_delete_contract(repo).await;
    test_list_contract(repo).await;
}

pub async fn test_health_check_contract<R: TaskRepository>(repo: &R) {
    assert!(
        repo.health_check().await.is_ok(),
        "Health check should pass for healthy repository"
    );
}

/// Creation assigns an id and timestamp and starts pending
pub async fn test_create_contract<R: TaskRepository>(repo: &R) {
    let before = chrono::Utc::now();
    let new_task = create_new_task();
    let task = repo
        .create(new_task.clone())
        .await
        .expect("Create should succeed");

    assert_created_from(&task, &new_task);
    assert!(task.created_at >= before, "createdAt should not predate the call");

    let other = repo
        .create(new_task)
        .await
        .expect("Duplicate titles are allowed");
    assert_ne!(task.id, other.id, "Each task should get a unique id");

    let rejected = repo.create(NewTask::new("", None)).await;
    assert!(
        rejected.unwrap_err().is_validation(),
        "Empty title should be rejected"
    );
}

pub async fn test_find_by_id_contract<R: TaskRepository>(repo: &R) {
    let created = repo.create(create_new_task()).await.unwrap();

    let found = repo.find_by_id(&created.id).await.unwrap();
    assert_eq!(found, Some(created), "Lookup should return the stored task");

    let missing = repo.find_by_id(&TaskId::generate()).await.unwrap();
    assert!(missing.is_none(), "Unknown id should return None, not an error");
}

/// Partial merge: omitted fields stay, explicit null clears description
pub async fn test_update_contract<R: TaskRepository>(repo: &R) {
    let created = repo.create(create_new_task()).await.unwrap();

    let renamed = repo
        .find_by_id_and_update(&created.id, UpdateTaskBuilder::new().with_title("Renamed").build())
        .await
        .unwrap()
        .expect("Task should exist");
    assert_eq!(renamed.title, "Renamed");
    assert_eq!(renamed.description, created.description);
    assert_eq!(renamed.completed, created.completed);
    assert_eq!(renamed.id, created.id);
    assert_eq!(renamed.created_at, created.created_at);

    let completed = repo
        .find_by_id_and_update(&created.id, UpdateTask::completed(true))
        .await
        .unwrap()
        .expect("Task should exist");
    assert!(completed.completed);
    assert_eq!(completed.title, "Renamed");

    let cleared = repo
        .find_by_id_and_update(&created.id, UpdateTaskBuilder::new().clear_description().build())
        .await
        .unwrap()
        .expect("Task should exist");
    assert!(cleared.description.is_none());

    let unchanged = repo
        .find_by_id_and_update(&created.id, UpdateTask::new())
        .await
        .unwrap();
    assert_eq!(unchanged, Some(cleared.clone()), "Empty update is a no-op");

    let empty_title = repo
        .find_by_id_and_update(&created.id, UpdateTaskBuilder::new().with_title("").build())
        .await;
    assert!(empty_title.unwrap_err().is_validation());
    assert_eq!(
        repo.find_by_id(&created.id).await.unwrap(),
        Some(cleared),
        "Rejected update should leave the record unchanged"
    );

    let missing = repo
        .find_by_id_and_update(&TaskId::generate(), UpdateTask::completed(true))
        .await
        .unwrap();
    assert!(missing.is_none());
}

pub async fn test_delete_contract<R: TaskRepository>(repo: &R) {
    let created = repo.create(create_new_task()).await.unwrap();

    let deleted = repo.find_by_id_and_delete(&created.id).await.unwrap();
    assert_eq!(deleted, Some(created.clone()), "Delete should return the removed task");

    assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
    assert!(
        repo.find_by_id_and_delete(&created.id).await.unwrap().is_none(),
        "Second delete should find nothing"
    );
}

/// Filtering by completion and insertion order
pub async fn test_list_contract<R: TaskRepository>(repo: &R) {
    let before = repo.find_many(TaskFilter::default()).await.unwrap().len();

    let first = repo.create(NewTask::new("list-1", None)).await.unwrap();
    let second = repo.create(NewTask::new("list-2", None)).await.unwrap();
    repo.find_by_id_and_update(&second.id, UpdateTask::completed(true))
        .await
        .unwrap();

    let all = repo.find_many(TaskFilter::default()).await.unwrap();
    assert_eq!(all.len(), before + 2);
    let first_pos = all.iter().position(|t| t.id == first.id).unwrap();
    let second_pos = all.iter().position(|t| t.id == second.id).unwrap();
    assert!(first_pos < second_pos, "Listing should keep insertion order");
    assert_tasks_in_creation_order(&all);

    let done = repo
        .find_many(TaskFilter {
            completed: Some(true),
        })
        .await
        .unwrap();
    assert_all_completed(&done, true);
    assert!(done.iter().any(|t| t.id == second.id));

    let pending = repo
        .find_many(TaskFilter {
            completed: Some(false),
        })
        .await
        .unwrap();
    assert_all_completed(&pending, false);
    assert!(pending.iter().any(|t| t.id == first.id));
    assert_eq!(done.len() + pending.len(), all.len());
}
