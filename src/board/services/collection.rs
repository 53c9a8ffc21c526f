//! Canonical in-memory task collection.

use crate::board::domain::{Task, TaskId, TaskPatch};
use std::collections::HashMap;
use thiserror::Error;

/// Errors returned by [`TaskCollection`] mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectionError {
    /// No task with the identifier is loaded.
    #[error("task not found in collection: {0}")]
    NotFound(TaskId),

    /// A task with the identifier is already loaded.
    #[error("task already present in collection: {0}")]
    Duplicate(TaskId),
}

/// The loaded project's tasks, indexed by identifier.
///
/// [`TaskCollection::apply_patch`] is the only way a loaded task's placement
/// changes.
#[derive(Debug, Clone, Default)]
pub struct TaskCollection {
    entries: HashMap<TaskId, Task>,
}

impl TaskCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all state and loads `tasks`.
    pub fn replace_all(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.entries = tasks
            .into_iter()
            .map(|task| (task.id().clone(), task))
            .collect();
    }

    /// Returns a loaded task.
    #[must_use]
    pub fn get(&self, task_id: &TaskId) -> Option<&Task> {
        self.entries.get(task_id)
    }

    /// Returns all tasks ordered by identifier.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .entries
            .values()
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.id().cmp(b.id()));
        tasks
    }

    /// Returns the direct subtasks of `parent_id`, ordered by identifier.
    #[must_use]
    pub fn subtasks(&self, parent_id: &TaskId) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .entries
            .values()
            .filter(|task| task.parent_id() == Some(parent_id))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.id().cmp(b.id()));
        tasks
    }

    /// Number of loaded tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no task is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies a patch to one task and returns its pre-patch snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] when the task is not loaded.
    pub fn apply_patch(
        &mut self,
        task_id: &TaskId,
        patch: &TaskPatch,
    ) -> Result<Task, CollectionError> {
        let task = self
            .entries
            .get_mut(task_id)
            .ok_or_else(|| CollectionError::NotFound(task_id.clone()))?;
        let previous = task.clone();
        task.apply(patch);
        Ok(previous)
    }

    /// Adds a newly created task.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Duplicate`] when the identifier is taken.
    pub fn insert(&mut self, task: Task) -> Result<(), CollectionError> {
        if self.entries.contains_key(task.id()) {
            return Err(CollectionError::Duplicate(task.id().clone()));
        }
        self.entries.insert(task.id().clone(), task);
        Ok(())
    }

    /// Removes a task, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] when the task is not loaded.
    pub fn remove(&mut self, task_id: &TaskId) -> Result<Task, CollectionError> {
        self.entries
            .remove(task_id)
            .ok_or_else(|| CollectionError::NotFound(task_id.clone()))
    }
}
