//! Domain model for the task pool and sprint boards.
//!
//! A task lives in exactly one place at a time: the pool or one column of
//! one sprint. [`BoardState`] enforces that through a location index kept
//! alongside the collections.

mod column;
mod error;
mod ids;
mod location;
mod priority;
mod sprint;
mod state;
mod status;
mod task;

pub use column::Column;
pub use error::{
    BoardDomainError, BoardInconsistency, ParseColumnError, ParsePriorityError,
    ParseSprintStatusError,
};
pub use ids::{SprintId, TaskId};
pub use location::TaskLocation;
pub use priority::Priority;
pub use sprint::{PersistedSprintData, Sprint, SprintColumns, SprintSchedule};
pub use state::{BoardState, LoadedBoard};
pub use status::{SprintStatus, StatusTransition, derive_status};
pub use task::{Task, TaskPatch};
