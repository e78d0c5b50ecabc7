//! Task persistence over a key-value store.
//!
//! The whole collection lives in one JSON array under [`TASKS_KEY`]. Every
//! mutation reads the array, modifies it, and writes it back in full. Two
//! overlapping mutations can therefore lose one of the writes; callers that
//! need more than one writer must serialize access themselves.

use super::TaskStorage;
use crate::error::{TaskError, TaskResult};
use crate::store::SharedStore;
use crate::types::{
    CreateTaskRequest, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, Task, UpdateTaskRequest,
};
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use tracing::{debug, error, info};
use uuid::Uuid;

/// Storage key holding the task collection blob.
pub const TASKS_KEY: &str = "tasks";

/// Stores the task collection as a single JSON blob.
pub struct TaskStorageService {
    store: SharedStore,
}

impl TaskStorageService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Strict read used by mutations: a read or parse failure is returned
    /// instead of being treated as an empty collection, so a damaged blob is
    /// never overwritten.
    fn load_tasks(&self) -> TaskResult<Vec<Task>> {
        let raw = self.store.get(TASKS_KEY).map_err(|e| {
            TaskError::storage("Failed to read tasks").with_details(format!("{:#}", e))
        })?;
        match raw {
            None => Ok(Vec::new()),
            Some(json) if json.trim().is_empty() => Ok(Vec::new()),
            Some(json) => Ok(serde_json::from_str(&json)?),
        }
    }

    fn save_tasks(&self, tasks: &[Task]) -> TaskResult<()> {
        let json = serde_json::to_string(tasks)?;
        self.store.set(TASKS_KEY, &json).map_err(|e| {
            error!(error = %e, "Error saving tasks");
            TaskError::storage("Failed to save tasks").with_details(format!("{:#}", e))
        })
    }
}

#[async_trait]
impl TaskStorage for TaskStorageService {
    async fn get_all_tasks(&self) -> TaskResult<Vec<Task>> {
        match self.load_tasks() {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                error!(code = ?e.code, error = %e, details = ?e.details, "Error loading tasks");
                Ok(Vec::new())
            }
        }
    }

    async fn create_task(&self, request: CreateTaskRequest) -> TaskResult<Task> {
        let title = validate_title(&request.title)?;
        let description = validate_description(&request.description)?;

        let mut tasks = self.load_tasks()?;
        let task = Task {
            id: generate_id(),
            title,
            description,
            is_completed: false,
            created_at: Utc::now().trunc_subsecs(3),
        };

        tasks.push(task.clone());
        self.save_tasks(&tasks)?;

        info!(task_id = %task.id, total = tasks.len(), "Created task");
        Ok(task)
    }

    async fn update_task(&self, request: UpdateTaskRequest) -> TaskResult<Task> {
        let request = UpdateTaskRequest {
            title: request.title.as_deref().map(validate_title).transpose()?,
            description: request
                .description
                .as_deref()
                .map(validate_description)
                .transpose()?,
            ..request
        };

        let mut tasks = self.load_tasks()?;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == request.id)
            .ok_or_else(|| TaskError::task_not_found(&request.id))?;

        let updated = request.apply_to(slot);
        *slot = updated.clone();
        self.save_tasks(&tasks)?;

        debug!(task_id = %updated.id, is_completed = updated.is_completed, "Updated task");
        Ok(updated)
    }

    async fn delete_task(&self, id: &str) -> TaskResult<()> {
        let mut tasks = self.load_tasks()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);

        if tasks.len() == before {
            debug!(task_id = %id, "Delete ignored, task not found");
            return Ok(());
        }

        self.save_tasks(&tasks)?;
        info!(task_id = %id, remaining = tasks.len(), "Deleted task");
        Ok(())
    }

    async fn clear_all_tasks(&self) -> TaskResult<()> {
        self.store.remove(TASKS_KEY).map_err(|e| {
            error!(error = %e, "Error clearing tasks");
            TaskError::storage("Failed to clear tasks").with_details(format!("{:#}", e))
        })?;
        info!("Cleared all tasks");
        Ok(())
    }
}

/// Time-ordered unique id: millisecond timestamp followed by random bits.
fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

fn validate_title(title: &str) -> TaskResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskError::missing_field("title"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TaskError::invalid_value(
            "title",
            &format!("title must be at most {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(title.to_string())
}

fn validate_description(description: &str) -> TaskResult<String> {
    let description = description.trim();
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(TaskError::invalid_value(
            "description",
            &format!(
                "description must be at most {} characters",
                MAX_DESCRIPTION_LEN
            ),
        ));
    }
    Ok(description.to_string())
}
