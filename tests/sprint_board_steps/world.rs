//! Shared world state for sprint board BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::fixture;
use sprintboard::{
    board::domain::{SprintId, TaskId},
    workspace::{
        adapters::{InMemorySnapshotStore, ManualClock, RandomIdGenerator},
        services::{Workspace, WorkspaceConfig},
    },
};

/// Workspace type used by the BDD world.
pub type TestWorkspace = Workspace<InMemorySnapshotStore, ManualClock, RandomIdGenerator>;

/// Scenario world for sprint board behaviour tests.
pub struct SprintBoardWorld {
    pub store: InMemorySnapshotStore,
    pub clock: Arc<ManualClock>,
    pub workspace: TestWorkspace,
    pub tasks: HashMap<String, TaskId>,
    pub sprints: HashMap<String, SprintId>,
}

impl SprintBoardWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 10, 9, 0, 0)
            .single()
            .unwrap_or_default();
        let store = InMemorySnapshotStore::new();
        let clock = Arc::new(ManualClock::new(start));
        let workspace = open(&store, &clock);

        Self {
            store,
            clock,
            workspace,
            tasks: HashMap::new(),
            sprints: HashMap::new(),
        }
    }

    /// Replaces the workspace with one freshly loaded from the store.
    pub fn reopen(&mut self) {
        self.workspace = open(&self.store, &self.clock);
    }

    /// Looks up a task created earlier in the scenario by description.
    pub fn task_id(&self, description: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(description)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no task named {description:?} in scenario world"))
    }

    /// Looks up a sprint created earlier in the scenario by name.
    pub fn sprint_id(&self, name: &str) -> Result<SprintId, eyre::Report> {
        self.sprints
            .get(name)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no sprint named {name:?} in scenario world"))
    }
}

impl Default for SprintBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn open(store: &InMemorySnapshotStore, clock: &Arc<ManualClock>) -> TestWorkspace {
    Workspace::open(
        Arc::new(store.clone()),
        Arc::clone(clock),
        Arc::new(RandomIdGenerator),
        &WorkspaceConfig::default(),
    )
    .map(|outcome| outcome.into_value())
    .unwrap_or_else(|err| panic!("default workspace configuration is valid: {err}"))
}

/// Splits a step's comma-separated list argument.
pub fn names(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SprintBoardWorld {
    SprintBoardWorld::default()
}
