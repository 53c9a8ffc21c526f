//! Optimistic synchronization of the board against the remote stores.
//!
//! Every mutation is applied to the task collection synchronously, before
//! the remote write is issued, so the board reflects it immediately. A
//! rejected write restores exactly the fields the mutation touched.
//! Persistence suspends only the operation that issued it; the controller
//! stays usable for further moves in the meantime.

use super::{
    BoardConfig, BoardError, LoadError, StatusRegistry, TaskCollection,
    ordering::{self, OrderingError, Partition},
};
use crate::board::{
    domain::{
        Board, MoveIntent, NewTask, Placement, ProjectId, Status, StatusId, Task, TaskId,
        TaskPatch, WorkspaceId,
    },
    ports::{StatusStore, TaskStore},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Progress of the most recent load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No load has been requested.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The last load succeeded.
    Loaded,
    /// The last load failed.
    Failed,
}

/// Read model handed to presentation.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    /// Project whose tasks are held, if any.
    pub project_id: Option<ProjectId>,
    /// Loaded tasks ordered by identifier.
    pub tasks: Vec<Task>,
    /// Workspace statuses in column order, or the fallback pipeline.
    pub statuses: Vec<Status>,
    /// Load progress.
    pub load_state: LoadState,
    /// Most recent user-visible error.
    pub error: Option<BoardError>,
}

impl BoardSnapshot {
    /// Returns `true` while a load is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }
}

/// How a move resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task was already at the target; no remote call was made.
    Unchanged,
    /// The remote store confirmed the new placement.
    Committed(Placement),
    /// The task is not (or no longer) loaded; nothing happened.
    Ignored,
}

/// Unconfirmed writes of one task, oldest first.
///
/// The newest pending placement is the one shown locally. Once nothing is
/// pending the task shows `durable` again.
#[derive(Debug)]
struct TaskFlights {
    durable: Placement,
    pending: Vec<(u64, Placement)>,
}

#[derive(Debug, Default)]
struct BoardState {
    project_id: Option<ProjectId>,
    load_state: LoadState,
    load_seq: u64,
    epoch: u64,
    registry: StatusRegistry,
    collection: TaskCollection,
    flights: HashMap<TaskId, TaskFlights>,
    next_ticket: u64,
    error: Option<BoardError>,
}

impl BoardState {
    /// Drops the collection contents and every write issued against them.
    fn reset(&mut self, tasks: Vec<Task>) {
        self.collection.replace_all(tasks);
        self.flights.clear();
        self.epoch += 1;
    }

    /// Shows `placement` locally and records the write that will persist it.
    fn dispatch(&mut self, task_id: &TaskId, placement: Placement) -> Option<InFlight> {
        let previous = self
            .collection
            .apply_patch(task_id, &TaskPatch::placing(placement.clone()))
            .ok()?;
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.flights
            .entry(task_id.clone())
            .or_insert_with(|| TaskFlights {
                durable: previous.placement(),
                pending: Vec::new(),
            })
            .pending
            .push((ticket, placement.clone()));
        Some(InFlight {
            task_id: task_id.clone(),
            placement,
            ticket,
        })
    }

    /// Settles a write and shows the placement the task should now have.
    ///
    /// Returns `false` when the write no longer belongs to the loaded board.
    fn settle(&mut self, flight: &InFlight, confirmed: bool) -> bool {
        if self.collection.get(&flight.task_id).is_none() {
            self.flights.remove(&flight.task_id);
            return false;
        }
        let Some(flights) = self.flights.get_mut(&flight.task_id) else {
            return false;
        };
        let Some(index) = flights
            .pending
            .iter()
            .position(|(ticket, _)| *ticket == flight.ticket)
        else {
            return false;
        };

        let (_, placement) = flights.pending.remove(index);
        if confirmed {
            flights.durable = placement;
        }
        let drained = flights.pending.is_empty();
        let shown = if drained {
            Some(flights.durable.clone())
        } else if index == flights.pending.len() {
            flights.pending.last().map(|(_, newest)| newest.clone())
        } else {
            None
        };
        if drained {
            self.flights.remove(&flight.task_id);
        }

        let Some(shown) = shown else {
            return true;
        };
        let current = self.collection.get(&flight.task_id).map(Task::placement);
        if current.as_ref() != Some(&shown)
            && self
                .collection
                .apply_patch(&flight.task_id, &TaskPatch::placing(shown))
                .is_ok()
        {
            debug!(task_id = %flight.task_id, "local placement restored");
        }
        true
    }

    fn layout(&self, workspace_id: &WorkspaceId) -> (Vec<Status>, Partition) {
        let statuses = self.registry.ordered(workspace_id);
        let partition = ordering::partition_by_status(&self.collection.tasks(), &statuses);
        (statuses, partition)
    }

    fn surface(&mut self, error: BoardError) -> BoardError {
        if error.is_user_visible() {
            warn!(%error, "board operation failed");
            self.error = Some(error.clone());
        }
        error
    }
}

fn lock_state(state: &Mutex<BoardState>) -> MutexGuard<'_, BoardState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A locally applied placement awaiting remote confirmation.
#[derive(Debug, Clone)]
struct InFlight {
    task_id: TaskId,
    placement: Placement,
    ticket: u64,
}

/// Withdraws a rejected write.
///
/// The task falls back to its newest write still pending, or to its last
/// durable placement when none is. A write against a board that has since
/// been reloaded is ignored.
fn settle_rejection(
    state: &Mutex<BoardState>,
    flight: InFlight,
    reason: String,
) -> Result<MoveOutcome, BoardError> {
    let mut guard = lock_state(state);
    if !guard.settle(&flight, false) {
        debug!(task_id = %flight.task_id, "rejected write no longer tracked");
        return Ok(MoveOutcome::Ignored);
    }
    warn!(task_id = %flight.task_id, %reason, "remote write rejected");
    Err(guard.surface(BoardError::MoveRejected {
        task_id: flight.task_id,
        reason,
    }))
}

fn settle_confirmation(state: &Mutex<BoardState>, flight: InFlight) -> MoveOutcome {
    let mut guard = lock_state(state);
    if guard.settle(&flight, true) {
        info!(task_id = %flight.task_id, position = flight.placement.position, "move committed");
    } else {
        debug!(task_id = %flight.task_id, "confirmed write no longer tracked");
    }
    MoveOutcome::Committed(flight.placement)
}

/// The remote half of a move whose local half has already been applied.
///
/// Dropping a pending move without persisting it leaves the local change in
/// place unconfirmed.
pub struct PendingMove<T: TaskStore> {
    store: Arc<T>,
    state: Arc<Mutex<BoardState>>,
    resolved: MoveOutcome,
    flight: Option<InFlight>,
}

impl<T: TaskStore> PendingMove<T> {
    /// The placement applied locally, or `None` when no remote call is due.
    #[must_use]
    pub fn placement(&self) -> Option<&Placement> {
        self.flight.as_ref().map(|flight| &flight.placement)
    }

    /// Persists the move, rolling it back if the store rejects it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::MoveRejected`] when the remote store rejected
    /// the write.
    pub async fn persist(self) -> Result<MoveOutcome, BoardError> {
        let Some(flight) = self.flight else {
            return Ok(self.resolved);
        };
        match self.store.update(&flight.task_id, &flight.placement).await {
            Ok(()) => Ok(settle_confirmation(&self.state, flight)),
            Err(err) => settle_rejection(&self.state, flight, err.to_string()),
        }
    }
}

/// Owns the board state of one workspace and keeps it in step with the
/// remote stores.
///
/// Clones share state.
pub struct BoardController<T, S, C>
where
    T: TaskStore,
    S: StatusStore,
    C: Clock + Send + Sync,
{
    task_store: Arc<T>,
    status_store: Arc<S>,
    clock: Arc<C>,
    workspace_id: WorkspaceId,
    config: BoardConfig,
    state: Arc<Mutex<BoardState>>,
}

impl<T, S, C> Clone for BoardController<T, S, C>
where
    T: TaskStore,
    S: StatusStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            task_store: Arc::clone(&self.task_store),
            status_store: Arc::clone(&self.status_store),
            clock: Arc::clone(&self.clock),
            workspace_id: self.workspace_id.clone(),
            config: self.config,
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, S, C> BoardController<T, S, C>
where
    T: TaskStore,
    S: StatusStore,
    C: Clock + Send + Sync,
{
    /// Creates an idle controller for a workspace with the default
    /// configuration.
    #[must_use]
    pub fn new(
        task_store: Arc<T>,
        status_store: Arc<S>,
        clock: Arc<C>,
        workspace_id: WorkspaceId,
    ) -> Self {
        Self {
            task_store,
            status_store,
            clock,
            workspace_id,
            config: BoardConfig::default(),
            state: Arc::new(Mutex::new(BoardState::default())),
        }
    }

    /// Replaces the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Config`] when the configuration is invalid.
    pub fn with_config(mut self, config: BoardConfig) -> Result<Self, BoardError> {
        self.config = config.validate()?;
        Ok(self)
    }

    /// Returns the workspace whose pipeline this board renders.
    #[must_use]
    pub const fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        lock_state(&self.state)
    }

    /// Fetches a project's tasks and the workspace's statuses.
    ///
    /// On success the collection is replaced wholesale and any in-flight
    /// write against the previous contents becomes a no-op. On failure a
    /// reload of the same project keeps the previous contents; loading a
    /// different project leaves the collection empty. A load overtaken by a
    /// newer one discards its result.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::LoadFailure`] when either fetch is rejected.
    #[tracing::instrument(skip(self), fields(workspace_id = %self.workspace_id))]
    pub async fn load(&self, project_id: ProjectId) -> Result<(), BoardError> {
        let seq = {
            let mut state = self.lock();
            state.load_seq += 1;
            state.load_state = LoadState::Loading;
            state.error = None;
            state.load_seq
        };

        let (tasks, statuses) = tokio::join!(
            self.task_store.list(&project_id),
            self.status_store.list(&self.workspace_id)
        );

        let mut state = self.lock();
        if state.load_seq != seq {
            debug!("load superseded by a newer load");
            return Ok(());
        }

        let fetched = tasks
            .map_err(LoadError::from)
            .and_then(|tasks| statuses.map(|statuses| (tasks, statuses)).map_err(LoadError::from));
        match fetched {
            Ok((tasks, statuses)) => {
                info!(
                    task_count = tasks.len(),
                    status_count = statuses.len(),
                    "board loaded"
                );
                state.registry.replace(self.workspace_id.clone(), statuses);
                state.reset(tasks);
                state.project_id = Some(project_id);
                state.load_state = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                if state.project_id.as_ref() != Some(&project_id) {
                    state.reset(Vec::new());
                    state.project_id = Some(project_id);
                }
                state.load_state = LoadState::Failed;
                Err(state.surface(BoardError::LoadFailure(err)))
            }
        }
    }

    /// Applies a move locally and returns its remote half.
    ///
    /// The board reflects the move as soon as this returns. Moves of tasks
    /// that are not loaded, and moves to the task's current column and
    /// index, resolve without a remote call.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownStatus`] for targets outside the
    /// pipeline and [`BoardError::PositionExhausted`] when the target column
    /// needs a renumber. Nothing is applied in either case.
    pub fn begin_move(&self, intent: MoveIntent) -> Result<PendingMove<T>, BoardError> {
        let mut state = self.lock();
        let (_, partition) = state.layout(&self.workspace_id);
        let placement = match ordering::compute_move(&partition, &intent, &self.config) {
            Ok(placement) => placement,
            Err(OrderingError::TaskNotFound(task_id)) => {
                debug!(%task_id, "move ignored, task not loaded");
                return Ok(self.settled(MoveOutcome::Ignored));
            }
            Err(err) => return Err(state.surface(err.into())),
        };

        let unchanged = state
            .collection
            .get(&intent.task_id)
            .is_some_and(|task| task.placement() == placement);
        if unchanged {
            debug!(task_id = %intent.task_id, "move is a no-op");
            return Ok(self.settled(MoveOutcome::Unchanged));
        }

        let Some(flight) = state.dispatch(&intent.task_id, placement) else {
            return Ok(self.settled(MoveOutcome::Ignored));
        };
        debug!(
            task_id = %flight.task_id,
            position = flight.placement.position,
            "move applied locally"
        );

        Ok(PendingMove {
            store: Arc::clone(&self.task_store),
            state: Arc::clone(&self.state),
            resolved: MoveOutcome::Unchanged,
            flight: Some(flight),
        })
    }

    fn settled(&self, outcome: MoveOutcome) -> PendingMove<T> {
        PendingMove {
            store: Arc::clone(&self.task_store),
            state: Arc::clone(&self.state),
            resolved: outcome,
            flight: None,
        }
    }

    /// Moves a task and waits for the remote store.
    ///
    /// # Errors
    ///
    /// See [`BoardController::begin_move`] and [`PendingMove::persist`].
    pub async fn move_task(&self, intent: MoveIntent) -> Result<MoveOutcome, BoardError> {
        self.begin_move(intent)?.persist().await
    }

    /// Moves a task and persists it on the Tokio runtime.
    ///
    /// The local change is visible on return; the handle resolves once the
    /// remote store answers. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// See [`BoardController::begin_move`].
    pub fn spawn_move(
        &self,
        intent: MoveIntent,
    ) -> Result<JoinHandle<Result<MoveOutcome, BoardError>>, BoardError>
    where
        T: 'static,
    {
        let pending = self.begin_move(intent)?;
        Ok(tokio::spawn(pending.persist()))
    }

    /// Marks a task complete by moving it to the end of the last column, or
    /// reopens it by moving it to the end of the first column.
    ///
    /// A task already in the destination column is left where it is.
    ///
    /// # Errors
    ///
    /// See [`BoardController::move_task`].
    pub async fn set_completed(
        &self,
        task_id: TaskId,
        completed: bool,
    ) -> Result<MoveOutcome, BoardError> {
        let intent = {
            let state = self.lock();
            let (statuses, partition) = state.layout(&self.workspace_id);
            let target = if completed {
                statuses.last()
            } else {
                statuses.first()
            };
            let Some(target) = target.map(|status| status.id.clone()) else {
                return Ok(MoveOutcome::Ignored);
            };
            let Some((bucket, _)) = partition.locate(&task_id) else {
                debug!(%task_id, "completion ignored, task not loaded");
                return Ok(MoveOutcome::Ignored);
            };
            if bucket.status_id == target {
                return Ok(MoveOutcome::Unchanged);
            }
            let index = partition.tasks(&target).len();
            MoveIntent::new(task_id, target, index)
        };
        self.move_task(intent).await
    }

    /// Creates a task at the end of its column.
    ///
    /// The task is visible immediately and withdrawn again if the remote
    /// store rejects it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotLoaded`] without a loaded project,
    /// [`BoardError::UnknownStatus`] for columns outside the pipeline,
    /// [`BoardError::PositionExhausted`] on position overflow, and
    /// [`BoardError::CreateRejected`] when the store rejects the task.
    pub async fn add_task(&self, new_task: NewTask) -> Result<Task, BoardError> {
        let (task, epoch) = {
            let mut state = self.lock();
            let project_id = match (&state.load_state, &state.project_id) {
                (LoadState::Loaded, Some(project_id)) => project_id.clone(),
                _ => return Err(BoardError::NotLoaded),
            };
            let (_, partition) = state.layout(&self.workspace_id);
            let column_id = new_task
                .status_id()
                .unwrap_or(partition.default_status_id())
                .clone();
            if !partition
                .bucket(&column_id)
                .is_some_and(|bucket| bucket.registered)
            {
                return Err(state.surface(BoardError::UnknownStatus(column_id)));
            }
            let position = match ordering::append_position(
                partition.tasks(&column_id),
                &column_id,
                &self.config,
            ) {
                Ok(position) => position,
                Err(err) => return Err(state.surface(err.into())),
            };

            let placement = Placement::new(new_task.status_id().cloned(), position);
            let task = Task::create(new_task, project_id, placement, &*self.clock);
            if let Err(err) = state.collection.insert(task.clone()) {
                return Err(state.surface(err.into()));
            }
            debug!(task_id = %task.id(), position, "task added locally");
            (task, state.epoch)
        };

        match self.task_store.insert(&task).await {
            Ok(()) => {
                info!(task_id = %task.id(), "task created");
                Ok(task)
            }
            Err(err) => {
                let mut state = self.lock();
                if state.epoch == epoch {
                    state.flights.remove(task.id());
                    if state.collection.remove(task.id()).is_err() {
                        debug!(task_id = %task.id(), "rejected task already gone");
                    }
                }
                Err(state.surface(BoardError::CreateRejected {
                    task_id: task.id().clone(),
                    reason: err.to_string(),
                }))
            }
        }
    }

    /// Reassigns evenly spaced positions to one column, preserving its
    /// order.
    ///
    /// The new positions are shown locally and persisted one task at a time.
    /// The first rejected write abandons the renumber: writes already
    /// confirmed are reverted remotely, and the column is shown with its
    /// previous positions again. Returns the number of tasks renumbered.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownStatus`] for columns outside the
    /// pipeline, [`BoardError::PositionExhausted`] on overflow, and
    /// [`BoardError::MoveRejected`] for the first rejected write.
    pub async fn renumber_column(&self, status_id: &StatusId) -> Result<usize, BoardError> {
        let flights = {
            let mut state = self.lock();
            let (_, partition) = state.layout(&self.workspace_id);
            let Some(bucket) = partition
                .bucket(status_id)
                .filter(|bucket| bucket.registered)
            else {
                return Err(state.surface(BoardError::UnknownStatus(status_id.clone())));
            };
            let assignments =
                match ordering::renumber_column(&bucket.tasks, status_id, &self.config) {
                    Ok(assignments) => assignments,
                    Err(err) => return Err(state.surface(err.into())),
                };

            bucket
                .tasks
                .iter()
                .zip(assignments)
                .filter(|(task, (_, position))| task.position() != *position)
                .filter_map(|(task, (task_id, position))| {
                    state.dispatch(&task_id, Placement::new(task.status_id().cloned(), position))
                })
                .collect::<Vec<_>>()
        };

        let mut written = Vec::new();
        let mut unwritten = flights.into_iter();
        let mut rejection = None;
        for flight in unwritten.by_ref() {
            match self.task_store.update(&flight.task_id, &flight.placement).await {
                Ok(()) => written.push(flight),
                Err(err) => {
                    rejection = Some((flight, err.to_string()));
                    break;
                }
            }
        }

        let Some((rejected, reason)) = rejection else {
            let mut state = self.lock();
            for flight in &written {
                state.settle(flight, true);
            }
            info!(%status_id, renumbered = written.len(), "column renumbered");
            return Ok(written.len());
        };

        let mut reverted = Vec::new();
        let mut kept = Vec::new();
        for flight in written {
            let original = self.revert_target(&flight);
            let Some(original) = original else {
                kept.push(flight);
                continue;
            };
            match self.task_store.update(&flight.task_id, &original).await {
                Ok(()) => reverted.push(flight),
                Err(err) => {
                    warn!(task_id = %flight.task_id, %err, "renumber revert rejected");
                    kept.push(flight);
                }
            }
        }

        {
            let mut state = self.lock();
            for flight in &kept {
                state.settle(flight, true);
            }
            for flight in reverted.iter().chain(unwritten.as_slice()) {
                state.settle(flight, false);
            }
        }
        warn!(%status_id, "column renumber abandoned");
        settle_rejection(&self.state, rejected, reason).map(|_| 0)
    }

    /// The durable placement a confirmed renumber write should be reverted
    /// to, if it is the task's only write in flight.
    fn revert_target(&self, flight: &InFlight) -> Option<Placement> {
        let state = self.lock();
        state
            .flights
            .get(&flight.task_id)
            .filter(|flights| flights.pending.len() == 1)
            .map(|flights| flights.durable.clone())
    }

    /// Returns the current read model.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        let state = self.lock();
        BoardSnapshot {
            project_id: state.project_id.clone(),
            tasks: state.collection.tasks(),
            statuses: state.registry.ordered(&self.workspace_id),
            load_state: state.load_state,
            error: state.error.clone(),
        }
    }

    /// Derives the board from the current statuses and tasks.
    #[must_use]
    pub fn board(&self) -> Board {
        let state = self.lock();
        let (statuses, partition) = state.layout(&self.workspace_id);
        partition.into_board(&statuses)
    }

    /// Returns a loaded task.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<Task> {
        self.lock().collection.get(task_id).cloned()
    }

    /// Returns the direct subtasks of a task.
    #[must_use]
    pub fn subtasks(&self, parent_id: &TaskId) -> Vec<Task> {
        self.lock().collection.subtasks(parent_id)
    }

    /// Dismisses the most recent error.
    pub fn clear_error(&self) {
        self.lock().error = None;
    }
}
