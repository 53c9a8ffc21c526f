//! Pure column partitioning and move placement.
//!
//! Nothing here mutates state. A move touches exactly one task: the moved
//! task receives a position between its new neighbours and siblings keep
//! theirs. When no free integer lies between the neighbours the move fails
//! with [`OrderingError::PositionExhausted`] and the column has to be
//! renumbered with [`renumber_column`].

use super::{BoardConfig, registry::FALLBACK_STATUS_ID};
use crate::board::domain::{
    Board, Column, MoveIntent, Placement, Status, StatusId, Task, TaskId,
};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised by the ordering engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderingError {
    /// The task is not part of the partition.
    #[error("task not found on board: {0}")]
    TaskNotFound(TaskId),

    /// The target column is not a known status.
    #[error("unknown status: {0}")]
    UnknownStatus(StatusId),

    /// No unused position exists at the requested index.
    #[error("no free position at index {index} of column {status_id}")]
    PositionExhausted {
        /// Target column.
        status_id: StatusId,
        /// Requested index within the column.
        index: usize,
    },
}

/// Tasks sharing one status, in visual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Status the bucket belongs to.
    pub status_id: StatusId,
    /// `false` for tasks whose status is missing from the registry.
    pub registered: bool,
    /// Tasks ordered by position, then identifier.
    pub tasks: Vec<Task>,
}

/// The result of [`partition_by_status`].
///
/// Registered buckets come first in registry order, including empty ones;
/// buckets for unknown status identifiers follow, ordered by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    default_status_id: StatusId,
    buckets: Vec<Bucket>,
}

impl Partition {
    /// All buckets.
    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// The bucket receiving tasks without a status.
    #[must_use]
    pub const fn default_status_id(&self) -> &StatusId {
        &self.default_status_id
    }

    /// Returns the bucket of a status.
    #[must_use]
    pub fn bucket(&self, status_id: &StatusId) -> Option<&Bucket> {
        self.buckets
            .iter()
            .find(|bucket| &bucket.status_id == status_id)
    }

    /// Returns the tasks of a status in visual order.
    #[must_use]
    pub fn tasks(&self, status_id: &StatusId) -> &[Task] {
        self.bucket(status_id)
            .map(|bucket| bucket.tasks.as_slice())
            .unwrap_or_default()
    }

    /// Locates a task, returning its bucket and index within it.
    #[must_use]
    pub fn locate(&self, task_id: &TaskId) -> Option<(&Bucket, usize)> {
        self.buckets.iter().find_map(|bucket| {
            bucket
                .tasks
                .iter()
                .position(|task| task.id() == task_id)
                .map(|index| (bucket, index))
        })
    }

    /// Number of tasks across all buckets.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.tasks.len()).sum()
    }

    /// Builds the rendered board for `statuses`.
    ///
    /// Buckets of unknown statuses are not rendered.
    #[must_use]
    pub fn into_board(mut self, statuses: &[Status]) -> Board {
        let columns = statuses
            .iter()
            .map(|status| {
                let tasks = self
                    .buckets
                    .iter_mut()
                    .find(|bucket| bucket.registered && bucket.status_id == status.id)
                    .map(|bucket| std::mem::take(&mut bucket.tasks))
                    .unwrap_or_default();
                Column {
                    status: status.clone(),
                    tasks,
                }
            })
            .collect();
        Board::new(columns)
    }
}

/// Visual order within a column: ascending position, ties broken by id.
#[must_use]
pub fn column_order(a: &Task, b: &Task) -> Ordering {
    a.position()
        .cmp(&b.position())
        .then_with(|| a.id().cmp(b.id()))
}

/// Groups tasks into per-status buckets.
///
/// `statuses` must already be in registry order. Tasks without a status join
/// the first status's bucket, or a synthetic `todo` bucket when `statuses`
/// is empty. Every task lands in exactly one bucket.
#[must_use]
pub fn partition_by_status(tasks: &[Task], statuses: &[Status]) -> Partition {
    let default_status_id = statuses
        .first()
        .map_or_else(|| StatusId::synthetic(FALLBACK_STATUS_ID), |status| status.id.clone());

    let mut buckets: Vec<Bucket> = Vec::with_capacity(statuses.len().max(1));
    for status in statuses {
        if buckets.iter().all(|bucket| bucket.status_id != status.id) {
            buckets.push(Bucket {
                status_id: status.id.clone(),
                registered: true,
                tasks: Vec::new(),
            });
        }
    }
    if buckets.is_empty() {
        buckets.push(Bucket {
            status_id: default_status_id.clone(),
            registered: true,
            tasks: Vec::new(),
        });
    }

    let mut orphans: Vec<Bucket> = Vec::new();
    for task in tasks {
        let key = task.status_id().unwrap_or(&default_status_id);
        if let Some(bucket) = buckets.iter_mut().find(|bucket| &bucket.status_id == key) {
            bucket.tasks.push(task.clone());
        } else if let Some(bucket) = orphans.iter_mut().find(|bucket| &bucket.status_id == key) {
            bucket.tasks.push(task.clone());
        } else {
            orphans.push(Bucket {
                status_id: key.clone(),
                registered: false,
                tasks: vec![task.clone()],
            });
        }
    }

    orphans.sort_by(|a, b| a.status_id.cmp(&b.status_id));
    buckets.extend(orphans);
    for bucket in &mut buckets {
        bucket.tasks.sort_by(column_order);
    }

    Partition {
        default_status_id,
        buckets,
    }
}

/// Computes the placement of a task moved to `intent.target_index` of the
/// target column.
///
/// A move to the task's current column and index returns its current
/// placement unchanged. A same-column move keeps the task's status
/// assignment (including an unset one); a cross-column move assigns the
/// intent's target status.
///
/// # Errors
///
/// Returns [`OrderingError::TaskNotFound`] when the task is not in the
/// partition, [`OrderingError::UnknownStatus`] when the target column is
/// not registered, and [`OrderingError::PositionExhausted`] when no unused
/// position exists between the new neighbours.
pub fn compute_move(
    partition: &Partition,
    intent: &MoveIntent,
    config: &BoardConfig,
) -> Result<Placement, OrderingError> {
    let (current_bucket, current_index) = partition
        .locate(&intent.task_id)
        .ok_or_else(|| OrderingError::TaskNotFound(intent.task_id.clone()))?;
    let task = current_bucket
        .tasks
        .get(current_index)
        .ok_or_else(|| OrderingError::TaskNotFound(intent.task_id.clone()))?;

    let target_status_id = intent
        .target_status_id
        .as_ref()
        .unwrap_or(partition.default_status_id());
    let target = partition
        .bucket(target_status_id)
        .filter(|bucket| bucket.registered)
        .ok_or_else(|| OrderingError::UnknownStatus(target_status_id.clone()))?;

    let same_column = target.status_id == current_bucket.status_id;
    let siblings: Vec<&Task> = target
        .tasks
        .iter()
        .filter(|sibling| sibling.id() != task.id())
        .collect();
    let index = intent.target_index.min(siblings.len());

    if same_column && index == current_index {
        return Ok(task.placement());
    }

    let position = interpolate(&siblings, index, config).ok_or_else(|| {
        OrderingError::PositionExhausted {
            status_id: target.status_id.clone(),
            index,
        }
    })?;
    let status_id = if same_column {
        task.status_id().cloned()
    } else {
        intent.target_status_id.clone()
    };
    Ok(Placement::new(status_id, position))
}

/// Position for a task appended after the last task of `column`.
///
/// # Errors
///
/// Returns [`OrderingError::PositionExhausted`] when the position would
/// overflow.
pub fn append_position(
    column: &[Task],
    status_id: &StatusId,
    config: &BoardConfig,
) -> Result<i64, OrderingError> {
    let siblings: Vec<&Task> = column.iter().collect();
    interpolate(&siblings, siblings.len(), config).ok_or_else(|| {
        OrderingError::PositionExhausted {
            status_id: status_id.clone(),
            index: siblings.len(),
        }
    })
}

/// Assigns evenly spaced positions to a column, preserving its order.
///
/// `column` must be in visual order. Positions start at
/// `config.seed_position` and grow by `config.renumber_spacing`.
///
/// # Errors
///
/// Returns [`OrderingError::PositionExhausted`] when the spaced positions
/// would overflow.
pub fn renumber_column(
    column: &[Task],
    status_id: &StatusId,
    config: &BoardConfig,
) -> Result<Vec<(TaskId, i64)>, OrderingError> {
    let mut next = Some(config.seed_position);
    let mut assignments = Vec::with_capacity(column.len());
    for (index, task) in column.iter().enumerate() {
        let position = next.ok_or_else(|| OrderingError::PositionExhausted {
            status_id: status_id.clone(),
            index,
        })?;
        assignments.push((task.id().clone(), position));
        next = position.checked_add(config.renumber_spacing);
    }
    Ok(assignments)
}

/// Picks a position for `siblings[index]` without renumbering anyone.
fn interpolate(siblings: &[&Task], index: usize, config: &BoardConfig) -> Option<i64> {
    let before = index
        .checked_sub(1)
        .and_then(|prev| siblings.get(prev))
        .map(|task| task.position());
    let after = siblings.get(index).map(|task| task.position());

    let candidate = match (before, after) {
        (None, None) => Some(config.seed_position),
        (None, Some(next)) => next.checked_sub(config.edge_step),
        (Some(prev), None) => prev.checked_add(config.edge_step),
        (Some(prev), Some(next)) => midpoint(prev, next),
    }?;

    // Equal neighbours (corrupt input) leave no room either.
    if siblings.iter().any(|task| task.position() == candidate) {
        return None;
    }
    Some(candidate)
}

/// Integer strictly between `low` and `high`, if any.
fn midpoint(low: i64, high: i64) -> Option<i64> {
    let (wide_low, wide_high) = (i128::from(low), i128::from(high));
    if wide_high - wide_low < 2 {
        return None;
    }
    i64::try_from((wide_low + wide_high) >> 1).ok()
}
