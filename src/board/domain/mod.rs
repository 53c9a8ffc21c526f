//! Domain model for the task board.
//!
//! Statuses and tasks are plain values; column membership and order are
//! never stored, they are derived from each task's status assignment and
//! position whenever a [`Board`] is built.

mod board;
mod error;
mod ids;
mod intent;
mod status;
mod task;

pub use board::{Board, Column};
pub use error::{BoardDomainError, ParsePriorityError};
pub use ids::{ProjectId, StatusId, TaskId, UserId, WorkspaceId};
pub use intent::{MoveIntent, Placement};
pub use status::Status;
pub use task::{NewTask, Priority, Task, TaskPatch, TaskRecord};
