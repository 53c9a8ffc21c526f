//! Shared builders for board unit tests.

use crate::board::domain::{
    Priority, ProjectId, Status, StatusId, Task, TaskId, TaskRecord, WorkspaceId,
};
use mockable::{Clock, DefaultClock};
use std::collections::BTreeSet;

pub const PROJECT: &str = "project-1";
pub const WORKSPACE: &str = "workspace-1";

pub fn task_id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

pub fn status_id(value: &str) -> StatusId {
    StatusId::new(value).expect("valid status id")
}

pub fn project_id() -> ProjectId {
    ProjectId::new(PROJECT).expect("valid project id")
}

pub fn workspace_id() -> WorkspaceId {
    WorkspaceId::new(WORKSPACE).expect("valid workspace id")
}

pub fn task(id: &str, status: Option<&str>, position: i64) -> Task {
    Task::from_record(TaskRecord {
        id: task_id(id),
        project_id: project_id(),
        status_id: status.map(status_id),
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

pub fn subtask(id: &str, parent: &str, status: Option<&str>, position: i64) -> Task {
    let base = task(id, status, position);
    Task::from_record(TaskRecord {
        id: base.id().clone(),
        project_id: base.project_id().clone(),
        status_id: base.status_id().cloned(),
        position,
        title: base.title().to_owned(),
        description: String::new(),
        priority: base.priority(),
        assignee_id: None,
        due_date: None,
        parent_id: Some(task_id(parent)),
        labels: BTreeSet::new(),
        created_at: base.created_at(),
    })
}

pub fn status(id: &str, position: i64) -> Status {
    Status::new(status_id(id), id.to_uppercase(), "#000000", position, workspace_id())
}

/// A three-column pipeline: `backlog`, `active`, `shipped`.
pub fn pipeline() -> Vec<Status> {
    vec![status("backlog", 10), status("active", 20), status("shipped", 30)]
}
