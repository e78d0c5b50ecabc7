//! Integration tests for the task list view.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use taskpad::error::{TaskError, TaskResult};
use taskpad::hooks::tasks::{
    CLEAR_FAILED, CREATE_FAILED, DELETE_FAILED, LOAD_FAILED, TOGGLE_FAILED, UPDATE_FAILED,
};
use taskpad::hooks::{TaskList, TaskListState};
use taskpad::services::{Services, TASKS_KEY, TaskStorage, TaskStorageService};
use taskpad::store::{KeyValueStore, MemoryStore, SharedStore};
use taskpad::types::{CreateTaskRequest, Task, TaskStats, UpdateTaskRequest};

/// Real service with switchable failures.
struct FlakyStorage {
    inner: TaskStorageService,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
}

impl FlakyStorage {
    fn new(store: SharedStore) -> Self {
        Self {
            inner: TaskStorageService::new(store),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            reads: AtomicUsize::new(0),
        }
    }

    fn check_write(&self) -> TaskResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(TaskError::storage("write refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TaskStorage for FlakyStorage {
    async fn get_all_tasks(&self) -> TaskResult<Vec<Task>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(TaskError::storage("read refused"));
        }
        self.inner.get_all_tasks().await
    }

    async fn create_task(&self, request: CreateTaskRequest) -> TaskResult<Task> {
        self.check_write()?;
        self.inner.create_task(request).await
    }

    async fn update_task(&self, request: UpdateTaskRequest) -> TaskResult<Task> {
        self.check_write()?;
        self.inner.update_task(request).await
    }

    async fn delete_task(&self, id: &str) -> TaskResult<()> {
        self.check_write()?;
        self.inner.delete_task(id).await
    }

    async fn clear_all_tasks(&self) -> TaskResult<()> {
        self.check_write()?;
        self.inner.clear_all_tasks().await
    }
}

/// Helper to mount a list over a fresh in-memory store.
async fn setup() -> (Arc<FlakyStorage>, TaskList) {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let storage = Arc::new(FlakyStorage::new(Arc::clone(&store)));
    let services = Services::new(store).with_task_storage(storage.clone());
    let list = TaskList::mount(services.tasks).await;
    (storage, list)
}

fn task_at(id: &str, title: &str, created_at: chrono::DateTime<Utc>) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        is_completed: false,
        created_at,
    }
}

fn titles(list: &TaskList) -> Vec<&str> {
    list.tasks().iter().map(|t| t.title.as_str()).collect()
}

mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn new_list_starts_loading() {
        let storage = Arc::new(FlakyStorage::new(Arc::new(MemoryStore::new())));
        let list = TaskList::new(storage.clone());

        assert!(list.loading());
        assert!(list.tasks().is_empty());
        assert_eq!(storage.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn mount_loads_once() {
        let (storage, list) = setup().await;

        assert!(!list.loading());
        assert!(list.error().is_none());
        assert_eq!(storage.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn mount_sees_existing_tasks() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let seed = TaskStorageService::new(Arc::clone(&store));
        seed.create_task(CreateTaskRequest::new("Existing", "")).await.unwrap();

        let list = TaskList::mount(Arc::new(TaskStorageService::new(store))).await;

        assert_eq!(titles(&list), vec!["Existing"]);
    }
}

mod ordering_tests {
    use super::*;

    #[tokio::test]
    async fn newer_task_comes_first() {
        let (_storage, mut list) = setup().await;

        list.create_task(CreateTaskRequest::new("A", "")).await;
        list.create_task(CreateTaskRequest::new("B", "")).await;

        assert_eq!(titles(&list), vec!["B", "A"]);
    }

    #[tokio::test]
    async fn back_to_back_creates_stay_newest_first() {
        for _ in 0..50 {
            let (_storage, mut list) = setup().await;

            list.create_task(CreateTaskRequest::new("A", "")).await;
            list.create_task(CreateTaskRequest::new("B", "")).await;
            list.create_task(CreateTaskRequest::new("C", "")).await;

            assert_eq!(titles(&list), vec!["C", "B", "A"]);
        }
    }

    #[tokio::test]
    async fn identical_timestamps_put_later_stored_first() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let seeded = vec![
            task_at("id-earlier", "Earlier", at - Duration::minutes(1)),
            task_at("id-first", "First", at),
            task_at("id-second", "Second", at),
        ];
        store
            .set(TASKS_KEY, &serde_json::to_string(&seeded).unwrap())
            .unwrap();

        let list = TaskList::mount(Arc::new(TaskStorageService::new(store))).await;

        assert_eq!(titles(&list), vec!["Second", "First", "Earlier"]);
    }

    #[tokio::test]
    async fn refresh_sorts_stored_blob_descending() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let offsets = [5, 1, 9, 3, 7, 2, 8];
        let seeded: Vec<Task> = offsets
            .iter()
            .map(|&m| {
                task_at(
                    &format!("id-{}", m),
                    &format!("T{}", m),
                    base + Duration::minutes(m),
                )
            })
            .collect();
        store
            .set(TASKS_KEY, &serde_json::to_string(&seeded).unwrap())
            .unwrap();

        let list = TaskList::mount(Arc::new(TaskStorageService::new(store))).await;

        assert_eq!(list.tasks().len(), offsets.len());
        for pair in list.tasks().windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
        assert_eq!(list.tasks()[0].id, "id-9");
    }
}

mod mutation_tests {
    use super::*;

    #[tokio::test]
    async fn create_refreshes_from_storage() {
        let (storage, mut list) = setup().await;

        list.create_task(CreateTaskRequest::new("Buy milk", "")).await;

        assert_eq!(list.tasks().len(), 1);
        assert!(!list.tasks()[0].is_completed);
        assert_eq!(storage.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn toggle_flips_and_persists() {
        let (storage, mut list) = setup().await;
        list.create_task(CreateTaskRequest::new("Flip me", "")).await;
        let id = list.tasks()[0].id.clone();

        list.toggle_task_completion(&id).await;
        assert!(list.tasks()[0].is_completed);
        assert!(storage.inner.get_all_tasks().await.unwrap()[0].is_completed);

        list.toggle_task_completion(&id).await;
        assert!(!list.tasks()[0].is_completed);
        assert!(!storage.inner.get_all_tasks().await.unwrap()[0].is_completed);
    }

    #[tokio::test]
    async fn toggle_unknown_id_does_nothing() {
        let (storage, mut list) = setup().await;
        list.create_task(CreateTaskRequest::new("Only", "")).await;
        let reads = storage.reads.load(Ordering::SeqCst);

        list.toggle_task_completion("stale-id").await;

        assert!(list.error().is_none());
        assert_eq!(storage.reads.load(Ordering::SeqCst), reads);
        assert!(!list.tasks()[0].is_completed);
    }

    #[tokio::test]
    async fn update_and_delete_refresh() {
        let (_storage, mut list) = setup().await;
        list.create_task(CreateTaskRequest::new("Old title", "")).await;
        let id = list.tasks()[0].id.clone();

        list.update_task(
            UpdateTaskRequest::new(&id)
                .with_title("New title")
                .with_description("rewritten"),
        )
        .await;
        assert_eq!(titles(&list), vec!["New title"]);
        assert_eq!(list.tasks()[0].description, "rewritten");

        list.delete_task(&id).await;
        assert!(list.tasks().is_empty());
        assert!(list.error().is_none());
    }

    #[tokio::test]
    async fn clear_empties_the_view() {
        let (storage, mut list) = setup().await;
        list.create_task(CreateTaskRequest::new("A", "")).await;
        list.create_task(CreateTaskRequest::new("B", "")).await;

        list.clear_all_tasks().await;

        assert!(list.error().is_none());
        assert!(list.tasks().is_empty());
        assert!(storage.inner.get_all_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_missing_task_reports_error() {
        let (_storage, mut list) = setup().await;

        list.update_task(UpdateTaskRequest::new("missing").with_completed(true)).await;

        assert_eq!(list.error(), Some(UPDATE_FAILED));
    }

    #[tokio::test]
    async fn stats_follow_the_view() {
        let (_storage, mut list) = setup().await;
        list.create_task(CreateTaskRequest::new("One", "")).await;
        list.create_task(CreateTaskRequest::new("Two", "")).await;
        let id = list.tasks()[0].id.clone();
        list.toggle_task_completion(&id).await;

        assert_eq!(
            list.stats(),
            TaskStats {
                total: 2,
                completed: 1,
                pending: 1
            }
        );
    }
}

mod error_tests {
    use super::*;

    #[tokio::test]
    async fn failed_clear_sets_message_and_keeps_list() {
        let (storage, mut list) = setup().await;
        list.create_task(CreateTaskRequest::new("Kept", "")).await;
        storage.fail_writes.store(true, Ordering::SeqCst);

        list.clear_all_tasks().await;

        assert_eq!(list.error(), Some(CLEAR_FAILED));
        assert_eq!(titles(&list), vec!["Kept"]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_list() {
        let (storage, mut list) = setup().await;
        list.create_task(CreateTaskRequest::new("Visible", "")).await;

        storage.fail_reads.store(true, Ordering::SeqCst);
        list.refresh_tasks().await;

        assert_eq!(list.error(), Some(LOAD_FAILED));
        assert!(!list.loading());
        assert_eq!(titles(&list), vec!["Visible"]);
    }

    #[tokio::test]
    async fn failed_writes_set_operation_messages() {
        let (storage, mut list) = setup().await;
        list.create_task(CreateTaskRequest::new("Existing", "")).await;
        let id = list.tasks()[0].id.clone();
        storage.fail_writes.store(true, Ordering::SeqCst);

        list.create_task(CreateTaskRequest::new("Nope", "")).await;
        assert_eq!(list.error(), Some(CREATE_FAILED));
        assert_eq!(titles(&list), vec!["Existing"]);

        list.update_task(UpdateTaskRequest::new(&id).with_title("Nope")).await;
        assert_eq!(list.error(), Some(UPDATE_FAILED));

        list.delete_task(&id).await;
        assert_eq!(list.error(), Some(DELETE_FAILED));

        list.toggle_task_completion(&id).await;
        assert_eq!(list.error(), Some(TOGGLE_FAILED));
        assert!(!list.tasks()[0].is_completed);
    }

    #[tokio::test]
    async fn next_success_clears_error() {
        let (storage, mut list) = setup().await;
        storage.fail_writes.store(true, Ordering::SeqCst);
        list.create_task(CreateTaskRequest::new("Nope", "")).await;
        assert!(list.error().is_some());

        storage.fail_writes.store(false, Ordering::SeqCst);
        list.create_task(CreateTaskRequest::new("Yes", "")).await;

        assert!(list.error().is_none());
        assert_eq!(titles(&list), vec!["Yes"]);
    }

    #[tokio::test]
    async fn invalid_request_surfaces_as_create_error() {
        let (_storage, mut list) = setup().await;

        list.create_task(CreateTaskRequest::new("   ", "")).await;

        assert_eq!(list.error(), Some(CREATE_FAILED));
        assert!(list.tasks().is_empty());
    }
}

mod subscription_tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_latest_state() {
        let (_storage, mut list) = setup().await;
        let mut rx = list.subscribe();

        list.create_task(CreateTaskRequest::new("Watched", "")).await;

        assert!(rx.has_changed().unwrap());
        let snapshot: TaskListState = rx.borrow_and_update().clone();
        assert_eq!(&snapshot, list.state());
        assert_eq!(snapshot.tasks.len(), 1);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn subscribers_see_errors() {
        let (storage, mut list) = setup().await;
        let rx = list.subscribe();
        storage.fail_reads.store(true, Ordering::SeqCst);

        list.refresh_tasks().await;

        assert_eq!(rx.borrow().error.as_deref(), Some(LOAD_FAILED));
    }
}
