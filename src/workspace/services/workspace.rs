//! Workspace service: load at startup, mutate, save after every change.

use crate::board::domain::{
    BoardDomainError, BoardState, Column, LoadedBoard, Priority, Sprint, SprintId,
    SprintSchedule, SprintStatus, StatusTransition, Task, TaskId, TaskLocation, TaskPatch,
};
use crate::notes::domain::{Note, NoteBook, NoteDomainError, NoteDraft, NoteId, NotePatch};
use crate::timestamp;
use crate::workspace::ports::{IdGenerator, SnapshotStore, SnapshotStoreError, StorageKey};
use crate::workspace::services::{
    Collection, Outcome, PersistencePhase, PersistenceWarning, SprintRecord, StorageKeys,
    WorkspaceConfig,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Service-level errors for workspace operations.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Board validation failed.
    #[error(transparent)]
    Board(#[from] BoardDomainError),
    /// Note validation failed.
    #[error(transparent)]
    Notes(#[from] NoteDomainError),
    /// The snapshot store configuration is unusable.
    #[error(transparent)]
    Store(#[from] SnapshotStoreError),
}

/// Result type for workspace service operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Single-user planning workspace: task pool, sprint boards, and notes.
///
/// Every operation runs to completion before returning. Mutations that
/// change a collection write that collection back to the store; a failed
/// write is returned as a [`PersistenceWarning`] and the in-memory change
/// stands. References to unknown tasks or notes are no-ops.
pub struct Workspace<S, C, G>
where
    S: SnapshotStore,
    C: Clock,
    G: IdGenerator,
{
    store: Arc<S>,
    clock: Arc<C>,
    ids: Arc<G>,
    keys: StorageKeys,
    pretty: bool,
    board: BoardState,
    notes: NoteBook,
}

impl<S, C, G> Workspace<S, C, G>
where
    S: SnapshotStore,
    C: Clock,
    G: IdGenerator,
{
    /// Opens a workspace and loads the task, sprint, and note snapshots.
    ///
    /// Unreadable or undecodable snapshots load as empty collections and are
    /// reported as warnings.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Store`] when a configured storage key is
    /// invalid.
    pub fn open(
        store: Arc<S>,
        clock: Arc<C>,
        ids: Arc<G>,
        config: &WorkspaceConfig,
    ) -> WorkspaceResult<Outcome<Self>> {
        let keys = config.storage_keys()?;
        let now = timestamp::truncate(clock.utc());
        let mut warnings = Vec::new();

        let pool: Vec<Task> =
            load_collection(&*store, Collection::Tasks, &keys.tasks, &mut warnings);
        let records: Vec<SprintRecord> =
            load_collection(&*store, Collection::Sprints, &keys.sprints, &mut warnings);
        let notes: Vec<Note> =
            load_collection(&*store, Collection::Notes, &keys.notes, &mut warnings);

        let sprints = records
            .into_iter()
            .map(|record| record.into_sprint(now))
            .collect();
        let LoadedBoard { board, dropped } = BoardState::from_parts(pool, sprints, now);
        if !dropped.is_empty() {
            warn!(
                dropped = dropped.len(),
                "discarded duplicate task copies while loading"
            );
        }
        debug!(
            tasks = board.task_count(),
            sprints = board.sprints().len(),
            notes = notes.len(),
            "workspace loaded"
        );

        let workspace = Self {
            store,
            clock,
            ids,
            keys,
            pretty: config.pretty_snapshots,
            board,
            notes: NoteBook::from_notes(notes),
        };
        Ok(Outcome::new(workspace, warnings))
    }

    /// Returns the board state.
    #[must_use]
    pub const fn board(&self) -> &BoardState {
        &self.board
    }

    /// Returns the note book.
    #[must_use]
    pub const fn notes(&self) -> &NoteBook {
        &self.notes
    }

    /// Returns the validated storage keys.
    #[must_use]
    pub const fn storage_keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Returns the status of a sprint derived at the current time.
    #[must_use]
    pub fn sprint_status(&self, sprint_id: &SprintId) -> Option<SprintStatus> {
        let now = self.now();
        self.board
            .sprint(sprint_id)
            .map(|sprint| sprint.status_at(now))
    }

    /// Adds a task to the pool.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Board`] when the generated identifier is
    /// already in use.
    pub fn add_task(
        &mut self,
        description: impl Into<String>,
        priority: Priority,
    ) -> WorkspaceResult<Outcome<Task>> {
        let now = self.now();
        let task = Task::new(
            TaskId::from_uuid(self.ids.next_uuid()),
            description,
            priority,
            now,
        );
        self.board.add_task(task.clone())?;
        debug!(task_id = %task.id(), "task added to pool");
        Ok(Outcome::new(task, self.persist(now, &[Collection::Tasks])))
    }

    /// Edits a task wherever it lives. Returns whether the task changed.
    pub fn edit_task(&mut self, task_id: &TaskId, patch: &TaskPatch) -> Outcome<bool> {
        let now = self.now();
        match self.board.edit_task(task_id, patch) {
            Some(TaskLocation::Pool) => Outcome::new(true, self.persist(now, &[Collection::Tasks])),
            Some(TaskLocation::Sprint { .. }) => {
                Outcome::new(true, self.persist(now, &[Collection::Sprints]))
            }
            None => {
                debug!(%task_id, "task edit changed nothing");
                Outcome::clean(false)
            }
        }
    }

    /// Deletes a task from the pool and the selection.
    pub fn delete_task(&mut self, task_id: &TaskId) -> Outcome<Option<Task>> {
        let now = self.now();
        let Some(task) = self.board.delete_task(task_id) else {
            debug!(%task_id, "pool task delete ignored");
            return Outcome::clean(None);
        };
        Outcome::new(Some(task), self.persist(now, &[Collection::Tasks]))
    }

    /// Toggles selection of a pool task; see [`BoardState::toggle_selection`].
    ///
    /// The selection is ephemeral and never persisted.
    pub fn toggle_task_selection(&mut self, task_id: &TaskId) -> Option<bool> {
        self.board.toggle_selection(task_id)
    }

    /// Removes a task from the selection.
    pub fn deselect_task(&mut self, task_id: &TaskId) -> bool {
        self.board.deselect_task(task_id)
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.board.clear_selection();
    }

    /// Creates a sprint from the listed pool tasks.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Board`] when the generated sprint
    /// identifier is already in use.
    pub fn create_sprint(
        &mut self,
        name: impl Into<String>,
        schedule: SprintSchedule,
        task_ids: &[TaskId],
    ) -> WorkspaceResult<Outcome<Sprint>> {
        let now = self.now();
        let sprint_id = SprintId::from_uuid(self.ids.next_uuid());
        let sprint = self
            .board
            .create_sprint(sprint_id, name, schedule.truncated(), task_ids, now)?;
        Ok(Outcome::new(sprint, self.persist_board(now)))
    }

    /// Creates a sprint from the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Board`] when the generated sprint
    /// identifier is already in use.
    pub fn create_sprint_from_selection(
        &mut self,
        name: impl Into<String>,
        schedule: SprintSchedule,
    ) -> WorkspaceResult<Outcome<Sprint>> {
        let selected = self.board.selection().to_vec();
        self.create_sprint(name, schedule, &selected)
    }

    /// Moves the listed pool tasks into a sprint's Open column. Returns how
    /// many tasks moved.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Board`] wrapping
    /// [`BoardDomainError::SprintNotFound`] for an unknown sprint.
    pub fn add_tasks_to_sprint(
        &mut self,
        sprint_id: &SprintId,
        task_ids: &[TaskId],
    ) -> WorkspaceResult<Outcome<usize>> {
        let now = self.now();
        let moved = self.board.add_tasks_to_sprint(sprint_id, task_ids, now)?;
        if moved == 0 {
            return Ok(Outcome::clean(0));
        }
        Ok(Outcome::new(moved, self.persist_board(now)))
    }

    /// Moves the current selection into a sprint's Open column.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Board`] wrapping
    /// [`BoardDomainError::SprintNotFound`] for an unknown sprint.
    pub fn add_selection_to_sprint(
        &mut self,
        sprint_id: &SprintId,
    ) -> WorkspaceResult<Outcome<usize>> {
        let selected = self.board.selection().to_vec();
        self.add_tasks_to_sprint(sprint_id, &selected)
    }

    /// Deletes a sprint, returning its tasks to the pool. Returns the
    /// identifiers of the returned tasks.
    pub fn delete_sprint(&mut self, sprint_id: &SprintId) -> Outcome<Option<Vec<TaskId>>> {
        let now = self.now();
        let Some(returned) = self.board.delete_sprint(sprint_id) else {
            debug!(%sprint_id, "sprint delete ignored");
            return Outcome::clean(None);
        };
        Outcome::new(Some(returned), self.persist_board(now))
    }

    /// Moves a task within one sprint board; see
    /// [`BoardState::move_task_within_board`].
    pub fn move_task_within_board(
        &mut self,
        sprint_id: &SprintId,
        task_id: &TaskId,
        from: Column,
        to: Column,
        target_index: usize,
    ) -> Outcome<bool> {
        let now = self.now();
        if !self
            .board
            .move_task_within_board(sprint_id, task_id, from, to, target_index, now)
        {
            debug!(%sprint_id, %task_id, %from, "board move ignored");
            return Outcome::clean(false);
        }
        Outcome::new(true, self.persist(now, &[Collection::Sprints]))
    }

    /// Returns a task from whichever sprint holds it to the pool.
    pub fn send_task_to_pool(&mut self, task_id: &TaskId) -> Outcome<bool> {
        let now = self.now();
        if !self.board.send_task_to_pool(task_id, now) {
            debug!(%task_id, "send to pool ignored");
            return Outcome::clean(false);
        }
        Outcome::new(true, self.persist_board(now))
    }

    /// Permanently deletes a task from whichever sprint holds it.
    pub fn delete_task_from_sprint(&mut self, task_id: &TaskId) -> Outcome<Option<Task>> {
        let now = self.now();
        let Some(task) = self.board.delete_task_from_sprint(task_id, now) else {
            debug!(%task_id, "sprint task delete ignored");
            return Outcome::clean(None);
        };
        Outcome::new(Some(task), self.persist(now, &[Collection::Sprints]))
    }

    /// Re-derives sprint statuses at the current time; the periodic tick.
    ///
    /// Sprints are persisted only when a status changed.
    pub fn refresh_statuses(&mut self) -> Outcome<Vec<StatusTransition>> {
        let now = self.now();
        let transitions = self.board.refresh_statuses(now);
        if transitions.is_empty() {
            return Outcome::clean(transitions);
        }
        Outcome::new(transitions, self.persist(now, &[Collection::Sprints]))
    }

    /// Adds a note.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Notes`] when the generated identifier is
    /// already in use.
    pub fn add_note(&mut self, draft: NoteDraft) -> WorkspaceResult<Outcome<Note>> {
        let now = self.now();
        let note = Note::new(NoteId::from_uuid(self.ids.next_uuid()), draft, now);
        self.notes.add(note.clone())?;
        Ok(Outcome::new(note, self.persist(now, &[Collection::Notes])))
    }

    /// Edits a note. Returns whether the note changed.
    pub fn edit_note(&mut self, note_id: &NoteId, patch: &NotePatch) -> Outcome<bool> {
        let now = self.now();
        if !self.notes.edit(note_id, patch) {
            debug!(%note_id, "note edit changed nothing");
            return Outcome::clean(false);
        }
        Outcome::new(true, self.persist(now, &[Collection::Notes]))
    }

    /// Deletes a note.
    pub fn delete_note(&mut self, note_id: &NoteId) -> Outcome<Option<Note>> {
        let now = self.now();
        let Some(note) = self.notes.delete(note_id) else {
            debug!(%note_id, "note delete ignored");
            return Outcome::clean(None);
        };
        Outcome::new(Some(note), self.persist(now, &[Collection::Notes]))
    }

    /// Writes every collection, returning any warnings.
    pub fn flush(&self) -> Vec<PersistenceWarning> {
        self.persist(
            self.now(),
            &[Collection::Sprints, Collection::Tasks, Collection::Notes],
        )
    }

    /// Current time at the precision snapshots keep.
    fn now(&self) -> DateTime<Utc> {
        timestamp::truncate(self.clock.utc())
    }

    /// Sprints are written before the pool so that a failure between the
    /// two writes duplicates a task on reload rather than losing it.
    fn persist_board(&self, now: DateTime<Utc>) -> Vec<PersistenceWarning> {
        self.persist(now, &[Collection::Sprints, Collection::Tasks])
    }

    fn persist(&self, now: DateTime<Utc>, collections: &[Collection]) -> Vec<PersistenceWarning> {
        collections
            .iter()
            .filter_map(|collection| self.save(*collection, now).err())
            .collect()
    }

    fn save(&self, collection: Collection, now: DateTime<Utc>) -> Result<(), PersistenceWarning> {
        let key = self.key(collection);
        let encoded = match collection {
            Collection::Tasks => encode(self.board.pool(), self.pretty),
            Collection::Sprints => {
                let records: Vec<SprintRecord> = self
                    .board
                    .sprints()
                    .iter()
                    .map(|sprint| SprintRecord::capture(sprint, now))
                    .collect();
                encode(&records, self.pretty)
            }
            Collection::Notes => encode(self.notes.notes(), self.pretty),
        };
        let payload = encoded.map_err(|err| {
            report(PersistenceWarning::new(
                collection,
                key,
                PersistencePhase::Encode,
                &err,
            ))
        })?;
        self.store.save(key, &payload).map_err(|err| {
            report(PersistenceWarning::new(
                collection,
                key,
                PersistencePhase::Save,
                &err,
            ))
        })?;
        debug!(%collection, %key, bytes = payload.len(), "snapshot saved");
        Ok(())
    }

    const fn key(&self, collection: Collection) -> &StorageKey {
        match collection {
            Collection::Tasks => &self.keys.tasks,
            Collection::Sprints => &self.keys.sprints,
            Collection::Notes => &self.keys.notes,
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn load_collection<S, T>(
    store: &S,
    collection: Collection,
    key: &StorageKey,
    warnings: &mut Vec<PersistenceWarning>,
) -> Vec<T>
where
    S: SnapshotStore + ?Sized,
    T: DeserializeOwned,
{
    let payload = match store.load(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warnings.push(report(PersistenceWarning::new(
                collection,
                key,
                PersistencePhase::Load,
                &err,
            )));
            return Vec::new();
        }
    };
    serde_json::from_str(&payload).unwrap_or_else(|err| {
        warnings.push(report(PersistenceWarning::new(
            collection,
            key,
            PersistencePhase::Decode,
            &err,
        )));
        Vec::new()
    })
}

fn report(warning: PersistenceWarning) -> PersistenceWarning {
    warn!(
        collection = %warning.collection,
        key = %warning.key,
        phase = %warning.phase,
        error = %warning.message,
        "snapshot persistence failed"
    );
    warning
}
