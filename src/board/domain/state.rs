//! Board aggregate owning the pool, the sprints, the selection, and the
//! task location index.

use super::{
    BoardDomainError, BoardInconsistency, Column, Sprint, SprintId, SprintSchedule,
    StatusTransition, Task, TaskId, TaskLocation, TaskPatch,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Authoritative task and sprint collections.
///
/// Every task is stored exactly once, either in the pool or in one column of
/// one sprint, and `locations` always records where. Operations that
/// reference an unknown task are no-ops reported through their return value;
/// the only reference error surfaced is an unknown sprint when adding tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pool: Vec<Task>,
    sprints: Vec<Sprint>,
    selection: Vec<TaskId>,
    locations: HashMap<TaskId, TaskLocation>,
}

/// Board rebuilt from persisted collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBoard {
    /// The rebuilt board.
    pub board: BoardState,
    /// Identifiers of duplicate task copies that were discarded.
    pub dropped: Vec<TaskId>,
}

impl BoardState {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a board from persisted pool and sprint collections.
    ///
    /// The first stored copy of a task wins, scanning the pool first and then
    /// each sprint's columns in board order; later copies are discarded and
    /// reported. A sprint whose identifier repeats an earlier one is
    /// dissolved and its tasks join the pool. Recorded statuses are derived
    /// at `now`.
    #[must_use]
    pub fn from_parts(
        pool: Vec<Task>,
        sprints: Vec<Sprint>,
        now: DateTime<Utc>,
    ) -> LoadedBoard {
        let mut board = Self::default();
        let mut dropped = Vec::new();

        for task in pool {
            board.admit_to_pool(task, &mut dropped);
        }

        for mut sprint in sprints {
            if board.sprint_position(sprint.id()).is_some() {
                warn!(
                    sprint_id = %sprint.id(),
                    "duplicate sprint in snapshot, returning its tasks to the pool"
                );
                for task in sprint.into_columns().into_tasks() {
                    board.admit_to_pool(task, &mut dropped);
                }
                continue;
            }

            let sprint_id = sprint.id().clone();
            for column in Column::ALL {
                let stored = std::mem::take(sprint.columns_mut().column_mut(column));
                let mut kept = Vec::with_capacity(stored.len());
                for task in stored {
                    if board.locations.contains_key(task.id()) {
                        warn!(
                            task_id = %task.id(),
                            sprint_id = %sprint_id,
                            "dropping duplicate task copy"
                        );
                        dropped.push(task.id().clone());
                        continue;
                    }
                    board.locations.insert(
                        task.id().clone(),
                        TaskLocation::Sprint {
                            sprint_id: sprint_id.clone(),
                            column,
                        },
                    );
                    kept.push(task);
                }
                *sprint.columns_mut().column_mut(column) = kept;
            }
            // Recorded status is re-derived silently; loading is not a transition.
            let _ = sprint.refresh_status(now);
            board.sprints.push(sprint);
        }

        LoadedBoard { board, dropped }
    }

    /// Returns the unassigned tasks in insertion order.
    #[must_use]
    pub fn pool(&self) -> &[Task] {
        &self.pool
    }

    /// Returns the sprints in creation order.
    #[must_use]
    pub fn sprints(&self) -> &[Sprint] {
        &self.sprints
    }

    /// Finds a sprint by identifier.
    #[must_use]
    pub fn sprint(&self, sprint_id: &SprintId) -> Option<&Sprint> {
        self.sprints.iter().find(|sprint| sprint.id() == sprint_id)
    }

    /// Returns where a task currently lives.
    #[must_use]
    pub fn location(&self, task_id: &TaskId) -> Option<&TaskLocation> {
        self.locations.get(task_id)
    }

    /// Finds a task wherever it currently lives.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        match self.locations.get(task_id)? {
            TaskLocation::Pool => self.pool.iter().find(|task| task.id() == task_id),
            TaskLocation::Sprint { sprint_id, column } => self
                .sprint(sprint_id)?
                .columns()
                .column(*column)
                .iter()
                .find(|task| task.id() == task_id),
        }
    }

    /// Returns the number of tasks on the board, pool included.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.locations.len()
    }

    /// Appends a new task to the pool.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateTask`] when the identifier is
    /// already in use anywhere on the board.
    pub fn add_task(&mut self, task: Task) -> Result<(), BoardDomainError> {
        if self.locations.contains_key(task.id()) {
            return Err(BoardDomainError::DuplicateTask(task.id().clone()));
        }
        self.locations.insert(task.id().clone(), TaskLocation::Pool);
        self.pool.push(task);
        Ok(())
    }

    /// Merges `patch` into the task wherever it lives.
    ///
    /// Returns the task's location when the patch changed it, and `None`
    /// when the task is unknown or the patch was already satisfied.
    pub fn edit_task(&mut self, task_id: &TaskId, patch: &TaskPatch) -> Option<TaskLocation> {
        let location = self.locations.get(task_id)?.clone();
        let task = match &location {
            TaskLocation::Pool => self.pool.iter_mut().find(|task| task.id() == task_id),
            TaskLocation::Sprint { sprint_id, column } => self
                .sprint_mut(sprint_id)?
                .columns_mut()
                .column_mut(*column)
                .iter_mut()
                .find(|task| task.id() == task_id),
        }?;
        task.apply(patch).then_some(location)
    }

    /// Removes a task from the pool and the selection.
    ///
    /// Tasks on a sprint board are left alone; see
    /// [`Self::delete_task_from_sprint`].
    pub fn delete_task(&mut self, task_id: &TaskId) -> Option<Task> {
        self.take_from_pool(task_id)
    }

    /// Returns the selected pool tasks in selection order.
    #[must_use]
    pub fn selection(&self) -> &[TaskId] {
        &self.selection
    }

    /// Returns whether a task is selected.
    #[must_use]
    pub fn is_selected(&self, task_id: &TaskId) -> bool {
        self.selection.contains(task_id)
    }

    /// Toggles selection of a pool task, returning whether it is now
    /// selected, or `None` when the task is not in the pool.
    pub fn toggle_selection(&mut self, task_id: &TaskId) -> Option<bool> {
        if !self.locations.get(task_id).is_some_and(TaskLocation::is_pool) {
            return None;
        }
        if self.deselect_task(task_id) {
            return Some(false);
        }
        self.selection.push(task_id.clone());
        Some(true)
    }

    /// Removes a task from the selection, returning whether it was selected.
    pub fn deselect_task(&mut self, task_id: &TaskId) -> bool {
        let before = self.selection.len();
        self.selection.retain(|selected| selected != task_id);
        self.selection.len() != before
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Creates a sprint whose Open column receives the listed pool tasks.
    ///
    /// Listed tasks are moved out of the pool in the order given; ids not in
    /// the pool are skipped. The selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateSprint`] when `sprint_id` is
    /// already in use.
    pub fn create_sprint(
        &mut self,
        sprint_id: SprintId,
        name: impl Into<String>,
        schedule: SprintSchedule,
        task_ids: &[TaskId],
        now: DateTime<Utc>,
    ) -> Result<Sprint, BoardDomainError> {
        if self.sprint_position(&sprint_id).is_some() {
            return Err(BoardDomainError::DuplicateSprint(sprint_id));
        }

        let open = self.take_pool_tasks(task_ids);
        self.index_open(&sprint_id, &open);
        let mut sprint = Sprint::new(sprint_id, name, schedule, open);
        log_transition(sprint.refresh_status(now).as_ref());
        self.selection.clear();

        info!(sprint_id = %sprint.id(), tasks = sprint.task_count(), "sprint created");
        self.sprints.push(sprint.clone());
        Ok(sprint)
    }

    /// Creates a sprint from the current selection, in selection order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateSprint`] when `sprint_id` is
    /// already in use.
    pub fn create_sprint_from_selection(
        &mut self,
        sprint_id: SprintId,
        name: impl Into<String>,
        schedule: SprintSchedule,
        now: DateTime<Utc>,
    ) -> Result<Sprint, BoardDomainError> {
        let selected = self.selection.clone();
        self.create_sprint(sprint_id, name, schedule, &selected, now)
    }

    /// Appends the listed pool tasks to a sprint's Open column and clears
    /// the selection. Returns how many tasks moved.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::SprintNotFound`] when no sprint carries
    /// `sprint_id`; the pool and selection are then left untouched.
    pub fn add_tasks_to_sprint(
        &mut self,
        sprint_id: &SprintId,
        task_ids: &[TaskId],
        now: DateTime<Utc>,
    ) -> Result<usize, BoardDomainError> {
        if self.sprint_position(sprint_id).is_none() {
            return Err(BoardDomainError::SprintNotFound(sprint_id.clone()));
        }

        let moved = self.take_pool_tasks(task_ids);
        let count = moved.len();
        self.index_open(sprint_id, &moved);
        if let Some(sprint) = self.sprint_mut(sprint_id) {
            sprint.columns_mut().column_mut(Column::Open).extend(moved);
            log_transition(sprint.refresh_status(now).as_ref());
        }
        self.selection.clear();
        Ok(count)
    }

    /// Appends the current selection to a sprint's Open column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::SprintNotFound`] when no sprint carries
    /// `sprint_id`.
    pub fn add_selection_to_sprint(
        &mut self,
        sprint_id: &SprintId,
        now: DateTime<Utc>,
    ) -> Result<usize, BoardDomainError> {
        let selected = self.selection.clone();
        self.add_tasks_to_sprint(sprint_id, &selected, now)
    }

    /// Deletes a sprint and appends all of its tasks to the pool, Open
    /// column first. Returns the identifiers of the returned tasks.
    pub fn delete_sprint(&mut self, sprint_id: &SprintId) -> Option<Vec<TaskId>> {
        let position = self.sprint_position(sprint_id)?;
        let sprint = self.sprints.remove(position);
        let tasks = sprint.into_columns().into_tasks();
        let returned: Vec<TaskId> = tasks.iter().map(|task| task.id().clone()).collect();
        for task in tasks {
            self.locations.insert(task.id().clone(), TaskLocation::Pool);
            self.pool.push(task);
        }
        info!(%sprint_id, returned = returned.len(), "sprint deleted");
        Some(returned)
    }

    /// Moves a task within one sprint board.
    ///
    /// The task must currently sit in `from`; it is removed there and
    /// inserted into `to` at `target_index`, clamped to the destination
    /// length after removal. Moving within one column reorders it. Returns
    /// whether the task moved.
    pub fn move_task_within_board(
        &mut self,
        sprint_id: &SprintId,
        task_id: &TaskId,
        from: Column,
        to: Column,
        target_index: usize,
        now: DateTime<Utc>,
    ) -> bool {
        let expected = TaskLocation::Sprint {
            sprint_id: sprint_id.clone(),
            column: from,
        };
        if self.locations.get(task_id) != Some(&expected) {
            return false;
        }
        let Some(sprint) = self.sprint_mut(sprint_id) else {
            return false;
        };

        let columns = sprint.columns_mut();
        let source = columns.column_mut(from);
        let Some(position) = source.iter().position(|task| task.id() == task_id) else {
            return false;
        };
        let task = source.remove(position);
        let destination = columns.column_mut(to);
        let index = target_index.min(destination.len());
        destination.insert(index, task);
        log_transition(sprint.refresh_status(now).as_ref());

        self.locations.insert(
            task_id.clone(),
            TaskLocation::Sprint {
                sprint_id: sprint_id.clone(),
                column: to,
            },
        );
        true
    }

    /// Moves a task from whichever sprint holds it back to the end of the
    /// pool. Returns whether the task moved.
    pub fn send_task_to_pool(&mut self, task_id: &TaskId, now: DateTime<Utc>) -> bool {
        let Some(task) = self.take_from_sprint(task_id, now) else {
            return false;
        };
        self.locations.insert(task_id.clone(), TaskLocation::Pool);
        self.pool.push(task);
        true
    }

    /// Permanently deletes a task from whichever sprint holds it.
    pub fn delete_task_from_sprint(
        &mut self,
        task_id: &TaskId,
        now: DateTime<Utc>,
    ) -> Option<Task> {
        self.take_from_sprint(task_id, now)
    }

    /// Re-derives every sprint's recorded status at `now`, returning the
    /// sprints whose status changed.
    pub fn refresh_statuses(&mut self, now: DateTime<Utc>) -> Vec<StatusTransition> {
        let transitions: Vec<StatusTransition> = self
            .sprints
            .iter_mut()
            .filter_map(|sprint| sprint.refresh_status(now))
            .collect();
        for transition in &transitions {
            log_transition(Some(transition));
        }
        transitions
    }

    /// Verifies that every task is stored once and indexed where it lives.
    ///
    /// # Errors
    ///
    /// Returns the first [`BoardInconsistency`] found.
    pub fn check_consistency(&self) -> Result<(), BoardInconsistency> {
        let mut stored: HashMap<&TaskId, TaskLocation> =
            HashMap::with_capacity(self.locations.len());
        let pooled = self.pool.iter().map(|task| (task, TaskLocation::Pool));
        let boarded = self.sprints.iter().flat_map(|sprint| {
            sprint.columns().iter().map(|(column, task)| {
                (
                    task,
                    TaskLocation::Sprint {
                        sprint_id: sprint.id().clone(),
                        column,
                    },
                )
            })
        });

        for (task, actual) in pooled.chain(boarded) {
            if stored.contains_key(task.id()) {
                return Err(BoardInconsistency::Duplicated(task.id().clone()));
            }
            match self.locations.get(task.id()) {
                None => return Err(BoardInconsistency::Unindexed(task.id().clone())),
                Some(indexed) if *indexed != actual => {
                    return Err(BoardInconsistency::Misplaced {
                        task_id: task.id().clone(),
                        indexed: indexed.clone(),
                        actual,
                    });
                }
                Some(_) => {}
            }
            stored.insert(task.id(), actual);
        }

        if let Some(orphan) = self.locations.keys().find(|id| !stored.contains_key(id)) {
            return Err(BoardInconsistency::Orphaned(orphan.clone()));
        }
        if let Some(stale) = self
            .selection
            .iter()
            .find(|id| !stored.get(id).is_some_and(TaskLocation::is_pool))
        {
            return Err(BoardInconsistency::StaleSelection(stale.clone()));
        }
        Ok(())
    }

    fn sprint_position(&self, sprint_id: &SprintId) -> Option<usize> {
        self.sprints.iter().position(|sprint| sprint.id() == sprint_id)
    }

    fn sprint_mut(&mut self, sprint_id: &SprintId) -> Option<&mut Sprint> {
        self.sprints.iter_mut().find(|sprint| sprint.id() == sprint_id)
    }

    fn admit_to_pool(&mut self, task: Task, dropped: &mut Vec<TaskId>) {
        if self.locations.contains_key(task.id()) {
            warn!(task_id = %task.id(), "dropping duplicate task copy");
            dropped.push(task.id().clone());
            return;
        }
        self.locations.insert(task.id().clone(), TaskLocation::Pool);
        self.pool.push(task);
    }

    fn index_open(&mut self, sprint_id: &SprintId, tasks: &[Task]) {
        for task in tasks {
            self.locations.insert(
                task.id().clone(),
                TaskLocation::Sprint {
                    sprint_id: sprint_id.clone(),
                    column: Column::Open,
                },
            );
        }
    }

    /// Removes a task from the pool, the selection, and the index.
    fn take_from_pool(&mut self, task_id: &TaskId) -> Option<Task> {
        if !self.locations.get(task_id).is_some_and(TaskLocation::is_pool) {
            return None;
        }
        let position = self.pool.iter().position(|task| task.id() == task_id)?;
        let task = self.pool.remove(position);
        self.locations.remove(task_id);
        self.deselect_task(task_id);
        Some(task)
    }

    fn take_pool_tasks(&mut self, task_ids: &[TaskId]) -> Vec<Task> {
        task_ids
            .iter()
            .filter_map(|task_id| {
                let taken = self.take_from_pool(task_id);
                if taken.is_none() {
                    debug!(%task_id, "skipping task that is not in the pool");
                }
                taken
            })
            .collect()
    }

    /// Removes a task from the sprint column the index places it in and
    /// refreshes that sprint's status.
    fn take_from_sprint(&mut self, task_id: &TaskId, now: DateTime<Utc>) -> Option<Task> {
        let TaskLocation::Sprint { sprint_id, column } = self.locations.get(task_id)?.clone()
        else {
            return None;
        };
        let Some(sprint) = self.sprint_mut(&sprint_id) else {
            warn!(%task_id, %sprint_id, "index points at a missing sprint");
            return None;
        };
        let tasks = sprint.columns_mut().column_mut(column);
        let Some(position) = tasks.iter().position(|task| task.id() == task_id) else {
            warn!(%task_id, %sprint_id, %column, "index points at the wrong column");
            return None;
        };
        let task = tasks.remove(position);
        log_transition(sprint.refresh_status(now).as_ref());
        self.locations.remove(task_id);
        Some(task)
    }
}

fn log_transition(transition: Option<&StatusTransition>) {
    if let Some(transition) = transition {
        info!(
            sprint_id = %transition.sprint_id,
            previous = %transition.previous,
            current = %transition.current,
            "sprint status changed"
        );
    }
}
