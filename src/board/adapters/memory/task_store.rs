//! In-memory remote task store with failure injection.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Placement, ProjectId, Task, TaskId, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Clones share state, so a test can keep a handle for inspection and
/// failure injection while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    list_failure: Option<String>,
    write_failure: Option<String>,
    rejected_tasks: HashSet<TaskId>,
    update_calls: usize,
    insert_calls: usize,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given tasks.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let store = Self::new();
        store.seed(tasks);
        store
    }

    /// Inserts or replaces tasks without counting as remote writes.
    pub fn seed(&self, tasks: impl IntoIterator<Item = Task>) {
        let mut state = self.write_state();
        for task in tasks {
            state.tasks.insert(task.id().clone(), task);
        }
    }

    /// Makes every subsequent `list` call fail with `reason`.
    pub fn reject_listing(&self, reason: impl Into<String>) {
        self.write_state().list_failure = Some(reason.into());
    }

    /// Makes every subsequent write (`update` and `insert`) fail with `reason`.
    pub fn reject_writes(&self, reason: impl Into<String>) {
        self.write_state().write_failure = Some(reason.into());
    }

    /// Makes subsequent updates of one task fail.
    pub fn reject_updates_for(&self, task_id: TaskId) {
        self.write_state().rejected_tasks.insert(task_id);
    }

    /// Clears every injected failure.
    pub fn accept_all(&self) {
        let mut state = self.write_state();
        state.list_failure = None;
        state.write_failure = None;
        state.rejected_tasks.clear();
    }

    /// Returns the durable copy of a task.
    #[must_use]
    pub fn get(&self, task_id: &TaskId) -> Option<Task> {
        self.read_state().tasks.get(task_id).cloned()
    }

    /// Number of `update` calls received, including rejected ones.
    #[must_use]
    pub fn update_calls(&self) -> usize {
        self.read_state().update_calls
    }

    /// Number of `insert` calls received, including rejected ones.
    #[must_use]
    pub fn insert_calls(&self) -> usize {
        self.read_state().insert_calls
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, InMemoryTaskState> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryTaskState> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list(&self, project_id: &ProjectId) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if let Some(reason) = &state.list_failure {
            return Err(TaskStoreError::Rejected(reason.clone()));
        }
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| {
            a.position()
                .cmp(&b.position())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(tasks)
    }

    async fn update(&self, task_id: &TaskId, placement: &Placement) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.update_calls += 1;
        if let Some(reason) = &state.write_failure {
            return Err(TaskStoreError::Rejected(reason.clone()));
        }
        if state.rejected_tasks.contains(task_id) {
            return Err(TaskStoreError::Rejected(format!(
                "updates to {task_id} are rejected"
            )));
        }
        let task = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| TaskStoreError::NotFound(task_id.clone()))?;
        task.apply(&TaskPatch::placing(placement.clone()));
        Ok(())
    }

    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.insert_calls += 1;
        if let Some(reason) = &state.write_failure {
            return Err(TaskStoreError::Rejected(reason.clone()));
        }
        if state.tasks.contains_key(task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id().clone()));
        }
        state.tasks.insert(task.id().clone(), task.clone());
        Ok(())
    }
}
