//! Shared test helpers for in-memory workspace integration tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::fixture;
use sprintboard::{
    board::domain::SprintSchedule,
    workspace::{
        adapters::{InMemorySnapshotStore, ManualClock, SequentialIdGenerator},
        services::{Workspace, WorkspaceConfig},
    },
};
use std::sync::Arc;

/// Workspace type used by the integration tests.
pub type TestWorkspace = Workspace<InMemorySnapshotStore, ManualClock, SequentialIdGenerator>;

/// Instant every test clock starts at.
pub fn monday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Provides a fresh in-memory store for each test.
#[fixture]
pub fn store() -> InMemorySnapshotStore {
    InMemorySnapshotStore::new()
}

/// Provides a clock stopped at [`monday`].
#[fixture]
pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(monday()))
}

/// Opens a workspace over `store`.
///
/// # Errors
///
/// Returns an error if the workspace cannot be opened or reports load
/// warnings.
pub fn open(
    store: &InMemorySnapshotStore,
    clock: &Arc<ManualClock>,
) -> Result<TestWorkspace, eyre::Report> {
    let (workspace, warnings) = Workspace::open(
        Arc::new(store.clone()),
        Arc::clone(clock),
        Arc::new(SequentialIdGenerator::new()),
        &WorkspaceConfig::default(),
    )?
    .into_parts();
    if !warnings.is_empty() {
        return Err(eyre::eyre!("unexpected load warnings: {warnings:?}"));
    }
    Ok(workspace)
}

/// A schedule starting at [`monday`] and lasting `days` days.
///
/// # Errors
///
/// Returns an error if `days` is negative.
pub fn sprint_days(days: i64) -> Result<SprintSchedule, eyre::Report> {
    Ok(SprintSchedule::new(monday(), monday() + Duration::days(days))?)
}
