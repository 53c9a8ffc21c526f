//! Pipeline stage definitions.

use super::{StatusId, WorkspaceId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A workspace-scoped pipeline stage rendered as one board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Stage identifier.
    pub id: StatusId,
    /// Display name.
    pub name: String,
    /// Display colour, usually a `#rrggbb` string.
    pub color: String,
    /// Left-to-right column order within the workspace.
    pub position: i64,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
}

impl Status {
    /// Creates a status value.
    #[must_use]
    pub fn new(
        id: StatusId,
        name: impl Into<String>,
        color: impl Into<String>,
        position: i64,
        workspace_id: WorkspaceId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            position,
            workspace_id,
        }
    }

    /// Column order: ascending position, ties broken by identifier.
    #[must_use]
    pub fn column_order(&self, other: &Self) -> Ordering {
        self.position
            .cmp(&other.position)
            .then_with(|| self.id.cmp(&other.id))
    }
}
