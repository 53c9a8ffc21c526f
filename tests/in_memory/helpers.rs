//! Shared test helpers for in-memory board integration tests.

use std::collections::BTreeSet;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryStatusStore, InMemoryTaskStore},
    domain::{Priority, ProjectId, Status, StatusId, Task, TaskId, TaskRecord, WorkspaceId},
    services::BoardController,
};

/// Controller type used by the integration tests.
pub type TestController = BoardController<InMemoryTaskStore, InMemoryStatusStore, DefaultClock>;

/// A controller together with handles onto its stores.
pub struct Board {
    pub controller: TestController,
    pub tasks: InMemoryTaskStore,
    pub statuses: InMemoryStatusStore,
}

impl Board {
    /// Builds a controller over stores seeded with `tasks` and `statuses`.
    pub fn with(tasks: Vec<Task>, statuses: Vec<Status>) -> Self {
        let task_store = InMemoryTaskStore::with_tasks(tasks);
        let status_store = InMemoryStatusStore::with_statuses(statuses);
        let controller = BoardController::new(
            Arc::new(task_store.clone()),
            Arc::new(status_store.clone()),
            Arc::new(DefaultClock),
            workspace(),
        );
        Self {
            controller,
            tasks: task_store,
            statuses: status_store,
        }
    }
}

/// Provides an empty board with no configured statuses.
#[fixture]
pub fn empty_board() -> Board {
    Board::with(Vec::new(), Vec::new())
}

pub fn workspace() -> WorkspaceId {
    WorkspaceId::new("acme").expect("valid workspace id")
}

pub fn project() -> ProjectId {
    ProjectId::new("website-redesign").expect("valid project id")
}

pub fn tid(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

pub fn sid(value: &str) -> StatusId {
    StatusId::new(value).expect("valid status id")
}

/// Builds a task of the test project.
pub fn task(id: &str, status: Option<&str>, position: i64) -> Task {
    Task::from_record(TaskRecord {
        id: tid(id),
        project_id: project(),
        status_id: status.map(sid),
        position,
        title: format!("Task {id}"),
        description: String::new(),
        priority: Priority::Medium,
        assignee_id: None,
        due_date: None,
        parent_id: None,
        labels: BTreeSet::new(),
        created_at: DefaultClock.utc(),
    })
}

/// Builds a workspace status.
pub fn status(id: &str, name: &str, position: i64) -> Status {
    Status::new(sid(id), name, "#3b82f6", position, workspace())
}

/// Task identifiers of a column, as strings.
pub fn column(controller: &TestController, status: &str) -> Vec<String> {
    controller
        .board()
        .task_ids(&sid(status))
        .into_iter()
        .map(|id| id.to_string())
        .collect()
}
