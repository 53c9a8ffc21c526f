//! Workspace status pipelines with a built-in fallback.

use crate::board::domain::{Status, StatusId, WorkspaceId};
use std::collections::HashMap;

/// Identifier of the first built-in status.
pub const FALLBACK_STATUS_ID: &str = "todo";

const DEFAULT_PIPELINE: [(&str, &str, &str); 5] = [
    (FALLBACK_STATUS_ID, "To do", "#db4035"),
    ("briefing", "Briefing", "#8b5cf6"),
    ("doing", "In production", "#3b82f6"),
    ("review", "In review", "#f59e0b"),
    ("done", "Delivered", "#10b981"),
];

/// Returns the built-in five-stage pipeline for a workspace.
///
/// These statuses are never persisted. They carry no marker; a caller knows
/// they are synthetic only because the workspace had no configured pipeline.
#[must_use]
pub fn default_pipeline(workspace_id: &WorkspaceId) -> Vec<Status> {
    DEFAULT_PIPELINE
        .iter()
        .zip(1_i64..)
        .map(|(&(id, name, color), position)| {
            Status::new(
                StatusId::synthetic(id),
                name,
                color,
                position,
                workspace_id.clone(),
            )
        })
        .collect()
}

/// Ordered pipeline stages per workspace.
#[derive(Debug, Clone, Default)]
pub struct StatusRegistry {
    pipelines: HashMap<WorkspaceId, Vec<Status>>,
}

impl StatusRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configured pipeline of a workspace.
    ///
    /// Statuses are kept in column order: ascending position with ties
    /// broken by identifier.
    pub fn replace(&mut self, workspace_id: WorkspaceId, mut statuses: Vec<Status>) {
        statuses.sort_by(Status::column_order);
        self.pipelines.insert(workspace_id, statuses);
    }

    /// Returns the stages of a workspace in column order, falling back to
    /// [`default_pipeline`] when none are configured.
    #[must_use]
    pub fn ordered(&self, workspace_id: &WorkspaceId) -> Vec<Status> {
        match self.pipelines.get(workspace_id) {
            Some(statuses) if !statuses.is_empty() => statuses.clone(),
            _ => default_pipeline(workspace_id),
        }
    }

    /// Returns `true` when the workspace has at least one configured stage.
    #[must_use]
    pub fn is_configured(&self, workspace_id: &WorkspaceId) -> bool {
        self.pipelines
            .get(workspace_id)
            .is_some_and(|statuses| !statuses.is_empty())
    }
}
