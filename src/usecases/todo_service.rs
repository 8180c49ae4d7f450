//! Todo domain service. Validation in front of the durable task store.
//!
//! No fallback tier exists for persistence — store errors reach the caller.

use crate::domain::{DomainError, Task, TaskDraft, TaskFilter, TaskPatch};
use crate::ports::{TaskStorePort, TodoServicePort};
use std::sync::Arc;
use tracing::info;

pub struct TodoService {
    store: Arc<dyn TaskStorePort>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TaskStorePort>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl TodoServicePort for TodoService {
    async fn add(&self, draft: TaskDraft) -> Result<Task, DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "task title must not be empty".to_string(),
            ));
        }
        let task = self.store.add(draft).await?;
        info!(task_id = %task.id, "task created");
        Ok(task)
    }

    async fn get(&self, id: &str) -> Result<Task, DomainError> {
        self.store.get(id).await
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, DomainError> {
        if patch.is_empty() {
            return Err(DomainError::InvalidRequest(
                "no fields to update provided".to_string(),
            ));
        }
        self.store.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.store.delete(id).await
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, DomainError> {
        self.store.list(filter).await
    }
}
