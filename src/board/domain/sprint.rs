//! Sprint aggregate: schedule, board columns, and recorded status.

use super::{
    BoardDomainError, Column, SprintId, SprintStatus, StatusTransition, Task, TaskId,
    derive_status,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated start and end instants of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintSchedule {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SprintSchedule {
    /// Creates a schedule spanning `start` to `end` inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidSchedule`] when `end` is before
    /// `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, BoardDomainError> {
        if end < start {
            return Err(BoardDomainError::InvalidSchedule { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a schedule from stored instants, moving an end that precedes
    /// the start up to the start.
    ///
    /// Older snapshots were written without the ordering check, and
    /// rejecting them would strand their tasks.
    #[must_use]
    pub fn clamped(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Creates a single-day schedule running from `now` to the last
    /// millisecond of the same UTC day.
    #[must_use]
    pub fn today(now: DateTime<Utc>) -> Self {
        let end = now
            .date_naive()
            .and_hms_milli_opt(23, 59, 59, 999)
            .map_or(now, |last| last.and_utc());
        Self { start: now, end }
    }

    /// Returns the schedule with both instants cut to millisecond precision.
    #[must_use]
    pub fn truncated(&self) -> Self {
        Self::clamped(
            crate::timestamp::truncate(self.start),
            crate::timestamp::truncate(self.end),
        )
    }

    /// Returns the start instant.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the end instant.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns whether `now` is strictly after the end instant.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        now > self.end
    }
}

/// The three task columns of a sprint board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintColumns {
    #[serde(rename = "Open", default)]
    open: Vec<Task>,
    #[serde(rename = "In Progress", default)]
    in_progress: Vec<Task>,
    #[serde(rename = "Done", default)]
    done: Vec<Task>,
}

impl SprintColumns {
    /// Creates columns with the given contents.
    #[must_use]
    pub const fn new(open: Vec<Task>, in_progress: Vec<Task>, done: Vec<Task>) -> Self {
        Self {
            open,
            in_progress,
            done,
        }
    }

    /// Returns the Open column.
    #[must_use]
    pub fn open(&self) -> &[Task] {
        &self.open
    }

    /// Returns the In Progress column.
    #[must_use]
    pub fn in_progress(&self) -> &[Task] {
        &self.in_progress
    }

    /// Returns the Done column.
    #[must_use]
    pub fn done(&self) -> &[Task] {
        &self.done
    }

    /// Returns the tasks of `column` in board order.
    #[must_use]
    pub fn column(&self, column: Column) -> &[Task] {
        match column {
            Column::Open => &self.open,
            Column::InProgress => &self.in_progress,
            Column::Done => &self.done,
        }
    }

    pub(crate) const fn column_mut(&mut self, column: Column) -> &mut Vec<Task> {
        match column {
            Column::Open => &mut self.open,
            Column::InProgress => &mut self.in_progress,
            Column::Done => &mut self.done,
        }
    }

    /// Returns the number of tasks across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns whether the board holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether the board holds tasks and all of them are Done.
    #[must_use]
    pub fn all_done(&self) -> bool {
        !self.done.is_empty() && self.open.is_empty() && self.in_progress.is_empty()
    }

    /// Iterates over every task with its column, Open first.
    pub fn iter(&self) -> impl Iterator<Item = (Column, &Task)> {
        Column::ALL
            .into_iter()
            .flat_map(move |column| self.column(column).iter().map(move |task| (column, task)))
    }

    /// Finds the column and index holding `task_id`.
    #[must_use]
    pub fn find(&self, task_id: &TaskId) -> Option<(Column, usize)> {
        Column::ALL.into_iter().find_map(|column| {
            self.column(column)
                .iter()
                .position(|task| task.id() == task_id)
                .map(|index| (column, index))
        })
    }

    /// Consumes the columns, yielding tasks Open first, then In Progress,
    /// then Done.
    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        let mut tasks = self.open;
        tasks.extend(self.in_progress);
        tasks.extend(self.done);
        tasks
    }
}

/// Parameter object for reconstructing a persisted sprint.
///
/// The persisted status is deliberately absent: it is always re-derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSprintData {
    /// Persisted sprint identifier.
    pub id: SprintId,
    /// Persisted display name.
    pub name: String,
    /// Persisted schedule.
    pub schedule: SprintSchedule,
    /// Persisted board columns.
    pub columns: SprintColumns,
}

/// A time-boxed sprint with its kanban board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprint {
    id: SprintId,
    name: String,
    schedule: SprintSchedule,
    columns: SprintColumns,
    recorded_status: SprintStatus,
}

impl Sprint {
    /// Creates a sprint whose Open column holds `open` and whose recorded
    /// status is [`SprintStatus::OnTrack`].
    #[must_use]
    pub fn new(
        id: SprintId,
        name: impl Into<String>,
        schedule: SprintSchedule,
        open: Vec<Task>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            schedule,
            columns: SprintColumns::new(open, Vec::new(), Vec::new()),
            recorded_status: SprintStatus::OnTrack,
        }
    }

    /// Reconstructs a sprint from persisted storage, deriving its status at
    /// `now`.
    #[must_use]
    pub fn from_persisted(data: PersistedSprintData, now: DateTime<Utc>) -> Self {
        let mut sprint = Self {
            id: data.id,
            name: data.name,
            schedule: data.schedule,
            columns: data.columns,
            recorded_status: SprintStatus::OnTrack,
        };
        sprint.recorded_status = derive_status(&sprint, now);
        sprint
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> &SprintId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the schedule.
    #[must_use]
    pub const fn schedule(&self) -> &SprintSchedule {
        &self.schedule
    }

    /// Returns the board columns.
    #[must_use]
    pub const fn columns(&self) -> &SprintColumns {
        &self.columns
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the status derived at `now`.
    ///
    /// Readers should prefer this over [`Self::recorded_status`], which only
    /// changes when the board is mutated or statuses are refreshed.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> SprintStatus {
        derive_status(self, now)
    }

    /// Returns the status recorded at the last mutation or refresh.
    #[must_use]
    pub const fn recorded_status(&self) -> SprintStatus {
        self.recorded_status
    }

    pub(crate) const fn columns_mut(&mut self) -> &mut SprintColumns {
        &mut self.columns
    }

    pub(crate) fn into_columns(self) -> SprintColumns {
        self.columns
    }

    /// Re-derives the recorded status at `now`, reporting any change.
    pub(crate) fn refresh_status(&mut self, now: DateTime<Utc>) -> Option<StatusTransition> {
        let current = derive_status(self, now);
        if current == self.recorded_status {
            return None;
        }
        let previous = std::mem::replace(&mut self.recorded_status, current);
        Some(StatusTransition {
            sprint_id: self.id.clone(),
            previous,
            current,
        })
    }
}
