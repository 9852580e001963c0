//! Sprint status derivation.

use super::{ParseSprintStatusError, Sprint, SprintId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Health of a sprint relative to its deadline and completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SprintStatus {
    /// Work remains and the end date has not passed.
    #[default]
    #[serde(rename = "On Track")]
    OnTrack,
    /// Every task on the board is in the Done column.
    Completed,
    /// Work remains after the end date.
    #[serde(rename = "Out of Track")]
    OutOfTrack,
}

impl SprintStatus {
    /// Returns the canonical label, which is also the snapshot value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::Completed => "Completed",
            Self::OutOfTrack => "Out of Track",
        }
    }
}

impl TryFrom<&str> for SprintStatus {
    type Error = ParseSprintStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "on track" => Ok(Self::OnTrack),
            "completed" => Ok(Self::Completed),
            "out of track" => Ok(Self::OutOfTrack),
            _ => Err(ParseSprintStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the status of `sprint` at instant `now`.
///
/// A sprint is [`SprintStatus::Completed`] when it holds at least one task
/// and all of them are in the Done column, whatever the date. Otherwise it
/// is [`SprintStatus::OutOfTrack`] once `now` is strictly after the end
/// date, and [`SprintStatus::OnTrack`] before that. An empty sprint is never
/// completed.
#[must_use]
pub fn derive_status(sprint: &Sprint, now: DateTime<Utc>) -> SprintStatus {
    let columns = sprint.columns();
    if columns.all_done() {
        SprintStatus::Completed
    } else if sprint.schedule().is_overdue(now) {
        SprintStatus::OutOfTrack
    } else {
        SprintStatus::OnTrack
    }
}

/// A change in a sprint's recorded status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    /// The sprint whose status changed.
    pub sprint_id: SprintId,
    /// Status recorded before the change.
    pub previous: SprintStatus,
    /// Status recorded after the change.
    pub current: SprintStatus,
}
