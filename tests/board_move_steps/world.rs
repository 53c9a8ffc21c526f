//! Shared world state for board move BDD scenarios.

use std::collections::BTreeSet;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryStatusStore, InMemoryTaskStore},
    domain::{Priority, ProjectId, StatusId, Task, TaskId, TaskRecord, WorkspaceId},
    services::{BoardController, BoardError, MoveOutcome},
};

/// Controller type used by the BDD world.
pub type TestBoardController =
    BoardController<InMemoryTaskStore, InMemoryStatusStore, DefaultClock>;

/// Scenario world for board move behaviour tests.
pub struct BoardWorld {
    pub controller: TestBoardController,
    pub tasks: InMemoryTaskStore,
    pub project_id: ProjectId,
    pub last_move: Option<Result<MoveOutcome, BoardError>>,
}

impl BoardWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let tasks = InMemoryTaskStore::new();
        let workspace_id = WorkspaceId::new("bdd-workspace").expect("valid workspace id");
        let controller = BoardController::new(
            Arc::new(tasks.clone()),
            Arc::new(InMemoryStatusStore::new()),
            Arc::new(DefaultClock),
            workspace_id,
        );

        Self {
            controller,
            tasks,
            project_id: ProjectId::new("bdd-project").expect("valid project id"),
            last_move: None,
        }
    }

    /// Builds a task belonging to the scenario project.
    pub fn task(
        &self,
        id: &str,
        status_id: Option<StatusId>,
        position: i64,
    ) -> Result<Task, eyre::Report> {
        Ok(Task::from_record(TaskRecord {
            id: TaskId::new(id)?,
            project_id: self.project_id.clone(),
            status_id,
            position,
            title: format!("Scenario task {id}"),
            description: String::new(),
            priority: Priority::Medium,
            assignee_id: None,
            due_date: None,
            parent_id: None,
            labels: BTreeSet::new(),
            created_at: DefaultClock.utc(),
        }))
    }

    /// Task identifiers of a rendered column, as strings.
    pub fn column(&self, status: &str) -> Result<Vec<String>, eyre::Report> {
        let status_id = StatusId::new(status)?;
        Ok(self
            .controller
            .board()
            .task_ids(&status_id)
            .into_iter()
            .map(|id| id.to_string())
            .collect())
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
