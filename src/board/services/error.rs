//! Service-level error taxonomy for board synchronization.

use super::{CollectionError, ConfigError, ordering::OrderingError};
use crate::board::{
    domain::{StatusId, TaskId},
    ports::{StatusStoreError, TaskStoreError},
};
use thiserror::Error;

/// Which remote fetch failed during a load.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// Fetching the project's tasks failed.
    #[error("fetching tasks failed: {0}")]
    Tasks(#[from] TaskStoreError),

    /// Fetching the workspace's statuses failed.
    #[error("fetching statuses failed: {0}")]
    Statuses(#[from] StatusStoreError),
}

/// Errors surfaced by the board controller.
///
/// None of them is fatal: the board stays renderable after each one.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// A load fetch was rejected.
    #[error("board could not be loaded: {0}")]
    LoadFailure(#[from] LoadError),

    /// Persisting a move was rejected and the move was rolled back.
    #[error("move of task {task_id} was rejected: {reason}")]
    MoveRejected {
        /// Moved task.
        task_id: TaskId,
        /// Store-provided reason.
        reason: String,
    },

    /// Persisting a new task was rejected and the task was withdrawn.
    #[error("task {task_id} could not be created: {reason}")]
    CreateRejected {
        /// Withdrawn task.
        task_id: TaskId,
        /// Store-provided reason.
        reason: String,
    },

    /// No free position exists at the drop target; the column needs a
    /// renumber before retrying.
    #[error("no free position at index {index} of column {status_id}")]
    PositionExhausted {
        /// Target column.
        status_id: StatusId,
        /// Requested index.
        index: usize,
    },

    /// The task is no longer loaded.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The target column is not part of the workspace pipeline.
    #[error("unknown status: {0}")]
    UnknownStatus(StatusId),

    /// The operation requires a loaded project.
    #[error("no project is loaded")]
    NotLoaded,

    /// The board configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BoardError {
    /// Returns `false` for errors that must never reach the user.
    #[must_use]
    pub const fn is_user_visible(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

impl From<OrderingError> for BoardError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::TaskNotFound(task_id) => Self::NotFound(task_id),
            OrderingError::UnknownStatus(status_id) => Self::UnknownStatus(status_id),
            OrderingError::PositionExhausted { status_id, index } => {
                Self::PositionExhausted { status_id, index }
            }
        }
    }
}

impl From<CollectionError> for BoardError {
    fn from(err: CollectionError) -> Self {
        match err {
            CollectionError::NotFound(task_id) => Self::NotFound(task_id),
            CollectionError::Duplicate(task_id) => Self::CreateRejected {
                reason: format!("duplicate task identifier {task_id}"),
                task_id,
            },
        }
    }
}
