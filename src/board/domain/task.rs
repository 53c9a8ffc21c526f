//! Task records and the patches that move them.

use super::{BoardDomainError, ParsePriorityError, Placement, ProjectId, StatusId, TaskId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Should be handled soon.
    High,
    /// Needs immediate attention.
    Urgent,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// A unit of work on the board.
///
/// Placement fields change only through [`TaskPatch`] applied by the task
/// collection, which keeps a single writer for everything that affects
/// column order.
///
/// Tasks serialize for presentation but are only reconstructed through
/// [`Task::from_record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    status_id: Option<StatusId>,
    position: i64,
    title: String,
    description: String,
    priority: Priority,
    assignee_id: Option<UserId>,
    due_date: Option<NaiveDate>,
    parent_id: Option<TaskId>,
    labels: BTreeSet<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a task fetched from the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Assigned status, if any.
    pub status_id: Option<StatusId>,
    /// Order key within the status column.
    pub position: i64,
    /// Title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Urgency.
    pub priority: Priority,
    /// Assigned member, if any.
    pub assignee_id: Option<UserId>,
    /// Due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Parent task for subtasks.
    pub parent_id: Option<TaskId>,
    /// Free-form labels.
    pub labels: BTreeSet<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from a remote record.
    #[must_use]
    pub fn from_record(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            project_id: record.project_id,
            status_id: record.status_id,
            position: record.position,
            title: record.title,
            description: record.description,
            priority: record.priority,
            assignee_id: record.assignee_id,
            due_date: record.due_date,
            parent_id: record.parent_id,
            labels: record.labels,
            created_at: record.created_at,
        }
    }

    /// Creates a task from a creation request at the given placement.
    #[must_use]
    pub fn create(
        new_task: NewTask,
        project_id: ProjectId,
        placement: Placement,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskId::generate(),
            project_id,
            status_id: placement.status_id,
            position: placement.position,
            title: new_task.title,
            description: new_task.description,
            priority: new_task.priority,
            assignee_id: new_task.assignee_id,
            due_date: new_task.due_date,
            parent_id: new_task.parent_id,
            labels: new_task.labels,
            created_at: clock.utc(),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the assigned status, if any.
    #[must_use]
    pub const fn status_id(&self) -> Option<&StatusId> {
        self.status_id.as_ref()
    }

    /// Returns the order key within the status column.
    #[must_use]
    pub const fn position(&self) -> i64 {
        self.position
    }

    /// Returns the current `(status_id, position)` pair.
    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement::new(self.status_id.clone(), self.position)
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assigned member, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<&UserId> {
        self.assignee_id.as_ref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the parent task, if this is a subtask.
    #[must_use]
    pub const fn parent_id(&self) -> Option<&TaskId> {
        self.parent_id.as_ref()
    }

    /// Returns the labels.
    #[must_use]
    pub const fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies a patch in place.
    pub(crate) fn apply(&mut self, patch: &TaskPatch) {
        if let Some(status_id) = &patch.status_id {
            self.status_id.clone_from(status_id);
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
    }
}

/// A partial update of a task's placement fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    status_id: Option<Option<StatusId>>,
    position: Option<i64>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status assignment.
    #[must_use]
    pub fn with_status(mut self, status_id: Option<StatusId>) -> Self {
        self.status_id = Some(status_id);
        self
    }

    /// Sets the position.
    #[must_use]
    pub const fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Creates a patch assigning both placement fields.
    #[must_use]
    pub fn placing(placement: Placement) -> Self {
        Self::new()
            .with_status(placement.status_id)
            .with_position(placement.position)
    }

    /// Creates a patch restoring exactly the fields this patch touches to
    /// their values in `snapshot`.
    #[must_use]
    pub fn restoring(&self, snapshot: &Task) -> Self {
        Self {
            status_id: self.status_id.as_ref().map(|_| snapshot.status_id.clone()),
            position: self.position.map(|_| snapshot.position),
        }
    }

    /// Returns the status assignment, if patched.
    #[must_use]
    pub const fn status_id(&self) -> Option<&Option<StatusId>> {
        self.status_id.as_ref()
    }

    /// Returns the position, if patched.
    #[must_use]
    pub const fn position(&self) -> Option<i64> {
        self.position
    }

    /// Returns `true` when the patch touches no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status_id.is_none() && self.position.is_none()
    }
}

/// Request payload for creating a task on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    status_id: Option<StatusId>,
    priority: Priority,
    assignee_id: Option<UserId>,
    due_date: Option<NaiveDate>,
    parent_id: Option<TaskId>,
    labels: BTreeSet<String>,
}

impl NewTask {
    /// Creates a request with the required title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            description: String::new(),
            status_id: None,
            priority: Priority::default(),
            assignee_id: None,
            due_date: None,
            parent_id: None,
            labels: BTreeSet::new(),
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the destination column.
    #[must_use]
    pub fn with_status(mut self, status_id: StatusId) -> Self {
        self.status_id = Some(status_id);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Makes the task a subtask of `parent_id`.
    #[must_use]
    pub fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Returns the requested column, if any.
    #[must_use]
    pub const fn status_id(&self) -> Option<&StatusId> {
        self.status_id.as_ref()
    }
}
