//! Move intents and computed placements.

use super::{StatusId, TaskId};
use serde::{Deserialize, Serialize};

/// A request to relocate a task to an index within a column.
///
/// `target_index` addresses the target column's visual order with the moved
/// task removed; it is not a raw position value. A `None` target addresses
/// the default (first) column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Task being moved.
    pub task_id: TaskId,
    /// Destination column, or `None` for the default column.
    pub target_status_id: Option<StatusId>,
    /// Destination index within the destination column.
    pub target_index: usize,
}

impl MoveIntent {
    /// Creates a move intent into the given column.
    #[must_use]
    pub const fn new(task_id: TaskId, target_status_id: StatusId, target_index: usize) -> Self {
        Self {
            task_id,
            target_status_id: Some(target_status_id),
            target_index,
        }
    }

    /// Creates a move intent into the default column.
    #[must_use]
    pub const fn to_default_column(task_id: TaskId, target_index: usize) -> Self {
        Self {
            task_id,
            target_status_id: None,
            target_index,
        }
    }
}

/// The `(status_id, position)` pair that determines where a task renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Assigned status; `None` renders under the first column.
    pub status_id: Option<StatusId>,
    /// Order key within the column.
    pub position: i64,
}

impl Placement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(status_id: Option<StatusId>, position: i64) -> Self {
        Self {
            status_id,
            position,
        }
    }
}
