//! Derived board view.

use super::{Status, StatusId, Task, TaskId};
use serde::Serialize;

/// One rendered column: a status and its tasks in visual order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// The pipeline stage.
    pub status: Status,
    /// Tasks in top-to-bottom order.
    pub tasks: Vec<Task>,
}

/// The ordered sequence of columns for the loaded project.
///
/// A board is rebuilt from the status registry and task collection on every
/// read and is never cached alongside them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    /// Creates a board from already ordered columns.
    #[must_use]
    pub const fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Returns the columns in left-to-right order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column for a status, if rendered.
    #[must_use]
    pub fn column(&self, status_id: &StatusId) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| &column.status.id == status_id)
    }

    /// Returns the task identifiers of a column in visual order.
    #[must_use]
    pub fn task_ids(&self, status_id: &StatusId) -> Vec<TaskId> {
        self.column(status_id)
            .map(|column| column.tasks.iter().map(|task| task.id().clone()).collect())
            .unwrap_or_default()
    }

    /// Locates a task, returning its column status and index.
    #[must_use]
    pub fn locate(&self, task_id: &TaskId) -> Option<(&StatusId, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .tasks
                .iter()
                .position(|task| task.id() == task_id)
                .map(|index| (&column.status.id, index))
        })
    }

    /// Total number of rendered tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }
}
