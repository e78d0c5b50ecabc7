//! Task list view state kept in sync with storage.
//!
//! Every mutation is followed by a full re-fetch; the list is never patched
//! from a mutation's return value, so the view always matches what was
//! persisted.

use crate::services::TaskStorage;
use crate::types::{CreateTaskRequest, Task, TaskStats, UpdateTaskRequest};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error};

pub const LOAD_FAILED: &str = "Failed to load tasks";
pub const CREATE_FAILED: &str = "Failed to create task";
pub const UPDATE_FAILED: &str = "Failed to update task";
pub const DELETE_FAILED: &str = "Failed to delete task";
pub const TOGGLE_FAILED: &str = "Failed to toggle task completion";
pub const CLEAR_FAILED: &str = "Failed to clear tasks";

/// Snapshot of what the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListState {
    /// Newest first.
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Mediator between the presentation layer and [`TaskStorage`].
///
/// Methods never return errors; failures are recorded in [`TaskListState::error`]
/// and last until the next operation clears them.
pub struct TaskList {
    service: Arc<dyn TaskStorage>,
    state: TaskListState,
    updates: watch::Sender<TaskListState>,
}

impl TaskList {
    /// Create an unloaded list. `loading` starts out true.
    pub fn new(service: Arc<dyn TaskStorage>) -> Self {
        let state = TaskListState {
            loading: true,
            ..Default::default()
        };
        let (updates, _) = watch::channel(state.clone());
        Self {
            service,
            state,
            updates,
        }
    }

    /// Create the list and run the initial load.
    pub async fn mount(service: Arc<dyn TaskStorage>) -> Self {
        let mut list = Self::new(service);
        list.refresh_tasks().await;
        list
    }

    pub fn state(&self) -> &TaskListState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.state.tasks)
    }

    /// Receive a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<TaskListState> {
        self.updates.subscribe()
    }

    /// Re-fetch everything. On failure the previous list is kept.
    pub async fn refresh_tasks(&mut self) {
        self.state.loading = true;
        self.state.error = None;
        self.publish();

        match self.service.get_all_tasks().await {
            Ok(mut tasks) => {
                sort_newest_first(&mut tasks);
                debug!(count = tasks.len(), "Refreshed tasks");
                self.state.tasks = tasks;
            }
            Err(e) => {
                error!(error = %e, "Error refreshing tasks");
                self.state.error = Some(LOAD_FAILED.to_string());
            }
        }

        self.state.loading = false;
        self.publish();
    }

    pub async fn create_task(&mut self, request: CreateTaskRequest) {
        self.clear_error();
        match self.service.create_task(request).await {
            Ok(_) => self.refresh_tasks().await,
            Err(e) => self.fail(CREATE_FAILED, &e),
        }
    }

    pub async fn update_task(&mut self, request: UpdateTaskRequest) {
        self.clear_error();
        match self.service.update_task(request).await {
            Ok(_) => self.refresh_tasks().await,
            Err(e) => self.fail(UPDATE_FAILED, &e),
        }
    }

    pub async fn delete_task(&mut self, id: &str) {
        self.clear_error();
        match self.service.delete_task(id).await {
            Ok(()) => self.refresh_tasks().await,
            Err(e) => self.fail(DELETE_FAILED, &e),
        }
    }

    /// Flip `is_completed` for a task in the current view. Ids not in the
    /// view are ignored.
    pub async fn toggle_task_completion(&mut self, id: &str) {
        self.clear_error();
        let Some(task) = self.state.tasks.iter().find(|t| t.id == id) else {
            debug!(task_id = %id, "Toggle ignored, task not in view");
            return;
        };

        let request = UpdateTaskRequest::new(id).with_completed(!task.is_completed);
        match self.service.update_task(request).await {
            Ok(_) => self.refresh_tasks().await,
            Err(e) => self.fail(TOGGLE_FAILED, &e),
        }
    }

    /// Remove every task, then refresh.
    pub async fn clear_all_tasks(&mut self) {
        self.clear_error();
        match self.service.clear_all_tasks().await {
            Ok(()) => self.refresh_tasks().await,
            Err(e) => self.fail(CLEAR_FAILED, &e),
        }
    }

    fn clear_error(&mut self) {
        if self.state.error.take().is_some() {
            self.publish();
        }
    }

    fn fail(&mut self, message: &str, err: &dyn std::fmt::Display) {
        error!(error = %err, "{}", message);
        self.state.error = Some(message.to_string());
        self.publish();
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }
}

/// Order by creation time, newest first. Tasks created in the same
/// millisecond keep reverse storage order, so the later insert wins.
pub fn sort_newest_first(tasks: &mut [Task]) {
    tasks.reverse();
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
