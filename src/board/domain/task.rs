//! Task record and partial updates.

use super::{Priority, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of work, either unassigned in the pool or placed on a sprint board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    description: String,
    priority: Priority,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    completed: bool,
}

impl Task {
    /// Creates a new, not yet completed task.
    #[must_use]
    pub fn new(
        id: TaskId,
        description: impl Into<String>,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            priority,
            created_at,
            completed: false,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the task has been ticked off.
    ///
    /// The flag is independent of the board column the task sits in.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Merges the fields present in `patch`, returning whether anything
    /// changed.
    pub fn apply(&mut self, patch: &TaskPatch) -> bool {
        let mut changed = false;
        if let Some(description) = &patch.description
            && *description != self.description
        {
            description.clone_into(&mut self.description);
            changed = true;
        }
        if let Some(priority) = patch.priority
            && priority != self.priority
        {
            self.priority = priority;
            changed = true;
        }
        if let Some(completed) = patch.completed
            && completed != self.completed
        {
            self.completed = completed;
            changed = true;
        }
        changed
    }
}

/// Partial update for a task; absent fields are left untouched.
///
/// The identifier and creation time are immutable and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    description: Option<String>,
    priority: Option<Priority>,
    completed: Option<bool>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns whether the patch carries no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none() && self.priority.is_none() && self.completed.is_none()
    }
}
