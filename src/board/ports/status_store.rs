//! Remote status store port.

use crate::board::domain::{Status, WorkspaceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for status store operations.
pub type StatusStoreResult<T> = Result<T, StatusStoreError>;

/// Remote pipeline-stage lookup contract.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Lists the statuses of a workspace, ordered by ascending position.
    ///
    /// An empty list is a valid response for workspaces without a
    /// configured pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`StatusStoreError`] when the fetch is rejected.
    async fn list(&self, workspace_id: &WorkspaceId) -> StatusStoreResult<Vec<Status>>;
}

/// Errors returned by status store implementations.
#[derive(Debug, Clone, Error)]
pub enum StatusStoreError {
    /// The store refused the operation.
    #[error("rejected by status store: {0}")]
    Rejected(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StatusStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
