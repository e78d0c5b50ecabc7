//! Services built once at startup and handed to the hooks.

pub mod tasks;
pub mod theme;

pub use tasks::{TASKS_KEY, TaskStorageService};
pub use theme::{THEME_KEY, ThemeService};

use crate::error::TaskResult;
use crate::store::SharedStore;
use crate::types::{CreateTaskRequest, Task, UpdateTaskRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Persistence operations for the task collection.
///
/// `TaskStorageService` is the production implementation; tests substitute
/// their own.
#[async_trait]
pub trait TaskStorage: Send + Sync {
    /// All stored tasks in insertion order. Unreadable data yields an empty list.
    async fn get_all_tasks(&self) -> TaskResult<Vec<Task>>;

    /// Persist a new task with a fresh id and creation time.
    async fn create_task(&self, request: CreateTaskRequest) -> TaskResult<Task>;

    /// Apply a partial patch. Fails with `TaskNotFound` if the id is unknown.
    async fn update_task(&self, request: UpdateTaskRequest) -> TaskResult<Task>;

    /// Remove a task. Unknown ids are ignored.
    async fn delete_task(&self, id: &str) -> TaskResult<()>;

    /// Drop the whole collection.
    async fn clear_all_tasks(&self) -> TaskResult<()>;
}

/// Explicitly constructed service set.
pub struct Services {
    pub tasks: Arc<dyn TaskStorage>,
    pub theme: ThemeService,
}

impl Services {
    /// Build the production services over one store.
    pub fn new(store: SharedStore) -> Self {
        let theme = ThemeService::load(Arc::clone(&store));
        Self {
            tasks: Arc::new(TaskStorageService::new(store)),
            theme,
        }
    }

    /// Replace the task storage, e.g. with a test double.
    pub fn with_task_storage(mut self, tasks: Arc<dyn TaskStorage>) -> Self {
        self.tasks = tasks;
        self
    }
}
