//! Error types for board domain validation and parsing.

use super::{SprintId, TaskId, TaskLocation};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by board domain constructors and operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// An identifier was empty after trimming.
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    /// The sprint would end before it starts.
    #[error("sprint ends at {end} before it starts at {start}")]
    InvalidSchedule {
        /// Requested start instant.
        start: DateTime<Utc>,
        /// Requested end instant.
        end: DateTime<Utc>,
    },

    /// No sprint carries the referenced identifier.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),

    /// A task with the same identifier is already on the board.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A sprint with the same identifier already exists.
    #[error("duplicate sprint identifier: {0}")]
    DuplicateSprint(SprintId),
}

/// Disagreement between the board collections and the location index.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardInconsistency {
    /// The task appears more than once across the pool and sprint columns.
    #[error("task {0} is stored in more than one place")]
    Duplicated(TaskId),

    /// The task is stored but the index has no entry for it.
    #[error("task {0} is stored but not indexed")]
    Unindexed(TaskId),

    /// The index places the task somewhere other than where it is stored.
    #[error("task {task_id} is indexed at {indexed:?} but stored at {actual:?}")]
    Misplaced {
        /// The affected task.
        task_id: TaskId,
        /// Location recorded in the index.
        indexed: TaskLocation,
        /// Location where the task is actually stored.
        actual: TaskLocation,
    },

    /// The index names a task that is not stored anywhere.
    #[error("task {0} is indexed but not stored")]
    Orphaned(TaskId),

    /// The selection names a task that is not in the pool.
    #[error("selected task {0} is not in the pool")]
    StaleSelection(TaskId),
}

/// Error returned while parsing a priority label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing a board column label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown column: {0}")]
pub struct ParseColumnError(pub String);

/// Error returned while parsing a sprint status label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sprint status: {0}")]
pub struct ParseSprintStatusError(pub String);
