//! Wire records for persisted sprints.
//!
//! Tasks and notes are persisted in their domain shape. Sprints need a
//! separate record because the stored `status` is written for readers of
//! the raw snapshot but never trusted on load.

use crate::board::domain::{
    PersistedSprintData, Sprint, SprintColumns, SprintId, SprintSchedule, SprintStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Snapshot form of one sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintRecord {
    /// Sprint identifier.
    pub id: SprintId,
    /// Display name.
    pub name: String,
    /// Start instant.
    #[serde(with = "crate::timestamp")]
    pub start_date: DateTime<Utc>,
    /// End instant.
    #[serde(with = "crate::timestamp")]
    pub end_date: DateTime<Utc>,
    /// Board columns keyed by column label.
    #[serde(default)]
    pub tasks: SprintColumns,
    /// Status derived when the record was written. Unrecognised labels
    /// read back as the default.
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: SprintStatus,
}

impl SprintRecord {
    /// Captures a sprint, deriving its status at `now`.
    #[must_use]
    pub fn capture(sprint: &Sprint, now: DateTime<Utc>) -> Self {
        Self {
            id: sprint.id().clone(),
            name: sprint.name().to_owned(),
            start_date: sprint.schedule().start(),
            end_date: sprint.schedule().end(),
            tasks: sprint.columns().clone(),
            status: sprint.status_at(now),
        }
    }

    /// Rebuilds the sprint, re-deriving its status at `now`.
    ///
    /// An end date before the start date is moved up to the start.
    #[must_use]
    pub fn into_sprint(self, now: DateTime<Utc>) -> Sprint {
        if self.end_date < self.start_date {
            warn!(
                sprint_id = %self.id,
                start = %self.start_date,
                end = %self.end_date,
                "sprint ends before it starts, clamping end date"
            );
        }
        let schedule = SprintSchedule::clamped(self.start_date, self.end_date);
        Sprint::from_persisted(
            PersistedSprintData {
                id: self.id,
                name: self.name,
                schedule,
                columns: self.tasks,
            },
            now,
        )
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<SprintStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .and_then(|label| SprintStatus::try_from(label).ok())
        .unwrap_or_default())
}
