//! Where a task currently lives.

use super::{Column, SprintId};
use std::fmt;

/// Current home of a task: the pool or one column of one sprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskLocation {
    /// The unassigned task pool.
    Pool,
    /// A column on a sprint board.
    Sprint {
        /// The owning sprint.
        sprint_id: SprintId,
        /// The column holding the task.
        column: Column,
    },
}

impl TaskLocation {
    /// Returns the owning sprint, if the task is on a board.
    #[must_use]
    pub const fn sprint_id(&self) -> Option<&SprintId> {
        match self {
            Self::Pool => None,
            Self::Sprint { sprint_id, .. } => Some(sprint_id),
        }
    }

    /// Returns whether the task is in the pool.
    #[must_use]
    pub const fn is_pool(&self) -> bool {
        matches!(self, Self::Pool)
    }
}

impl fmt::Display for TaskLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool => f.write_str("pool"),
            Self::Sprint { sprint_id, column } => write!(f, "sprint {sprint_id} / {column}"),
        }
    }
}
