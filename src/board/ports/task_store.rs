//! Remote task store port.

use crate::board::domain::{Placement, ProjectId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Remote task persistence contract.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Lists every task of a project, ordered by ascending position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the fetch is rejected.
    async fn list(&self, project_id: &ProjectId) -> TaskStoreResult<Vec<Task>>;

    /// Persists a task's `(status_id, position)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist or
    /// another [`TaskStoreError`] when the write is rejected.
    async fn update(&self, task_id: &TaskId, placement: &Placement) -> TaskStoreResult<()>;

    /// Stores a newly created task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the identifier already
    /// exists or another [`TaskStoreError`] when the write is rejected.
    async fn insert(&self, task: &Task) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
///
/// The board only distinguishes success from failure; the variants exist
/// for diagnostics.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The store refused the operation.
    #[error("rejected by task store: {0}")]
    Rejected(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
