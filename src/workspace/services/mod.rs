//! Application services for the planning workspace.

mod config;
mod outcome;
mod snapshot;
mod workspace;

pub use config::{StorageKeys, WorkspaceConfig};
pub use outcome::{Collection, Outcome, PersistencePhase, PersistenceWarning};
pub use snapshot::SprintRecord;
pub use workspace::{Workspace, WorkspaceError, WorkspaceResult};
