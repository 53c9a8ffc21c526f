//! In-memory remote status store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Status, WorkspaceId},
    ports::{StatusStore, StatusStoreError, StatusStoreResult},
};

/// Thread-safe in-memory status store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatusStore {
    state: Arc<RwLock<InMemoryStatusState>>,
}

#[derive(Debug, Default)]
struct InMemoryStatusState {
    statuses: HashMap<WorkspaceId, Vec<Status>>,
    list_failure: Option<String>,
}

impl InMemoryStatusStore {
    /// Creates an empty store; every workspace has no configured pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given statuses, keyed by their workspace.
    #[must_use]
    pub fn with_statuses(statuses: impl IntoIterator<Item = Status>) -> Self {
        let store = Self::new();
        {
            let mut state = store
                .state
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            for status in statuses {
                state
                    .statuses
                    .entry(status.workspace_id.clone())
                    .or_default()
                    .push(status);
            }
        }
        store
    }

    /// Makes every subsequent `list` call fail with `reason`.
    pub fn reject_listing(&self, reason: impl Into<String>) {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .list_failure = Some(reason.into());
    }
}

#[async_trait]
impl StatusStore for InMemoryStatusStore {
    async fn list(&self, workspace_id: &WorkspaceId) -> StatusStoreResult<Vec<Status>> {
        let state = self.state.read().map_err(|err| {
            StatusStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if let Some(reason) = &state.list_failure {
            return Err(StatusStoreError::Rejected(reason.clone()));
        }
        let mut statuses = state
            .statuses
            .get(workspace_id)
            .cloned()
            .unwrap_or_default();
        statuses.sort_by(Status::column_order);
        Ok(statuses)
    }
}
