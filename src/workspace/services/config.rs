//! Workspace configuration.

use crate::workspace::ports::{SnapshotStoreError, SnapshotStoreResult, StorageKey};
use serde::{Deserialize, Serialize};

/// Storage settings for a workspace.
///
/// # Examples
///
/// ```
/// use sprintboard::workspace::services::WorkspaceConfig;
///
/// let config = WorkspaceConfig::default();
/// assert_eq!(config.tasks_key, "tasks");
///
/// let scoped = WorkspaceConfig::namespaced("team-a");
/// assert_eq!(scoped.sprints_key, "team-a.sprints");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Key of the task pool snapshot.
    pub tasks_key: String,
    /// Key of the sprint list snapshot.
    pub sprints_key: String,
    /// Key of the note list snapshot.
    pub notes_key: String,
    /// Whether snapshots are written as indented JSON.
    pub pretty_snapshots: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            tasks_key: "tasks".to_owned(),
            sprints_key: "sprints".to_owned(),
            notes_key: "notes".to_owned(),
            pretty_snapshots: false,
        }
    }
}

impl WorkspaceConfig {
    /// Creates a configuration whose keys are prefixed with `prefix.`.
    ///
    /// Useful when several workspaces share one store.
    #[must_use]
    pub fn namespaced(prefix: &str) -> Self {
        Self {
            tasks_key: format!("{prefix}.tasks"),
            sprints_key: format!("{prefix}.sprints"),
            notes_key: format!("{prefix}.notes"),
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Validates the configured keys.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::InvalidKey`] for the first unusable
    /// key, and [`SnapshotStoreError::SharedKey`] when two collections are
    /// given the same key.
    pub fn storage_keys(&self) -> SnapshotStoreResult<StorageKeys> {
        let keys = StorageKeys {
            tasks: StorageKey::new(self.tasks_key.as_str())?,
            sprints: StorageKey::new(self.sprints_key.as_str())?,
            notes: StorageKey::new(self.notes_key.as_str())?,
        };
        let shared = if keys.tasks == keys.sprints || keys.tasks == keys.notes {
            Some(&keys.tasks)
        } else if keys.sprints == keys.notes {
            Some(&keys.sprints)
        } else {
            None
        };
        if let Some(key) = shared {
            return Err(SnapshotStoreError::SharedKey(key.to_string()));
        }
        Ok(keys)
    }
}

/// Validated storage keys, one per persisted collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Key of the task pool snapshot.
    pub tasks: StorageKey,
    /// Key of the sprint list snapshot.
    pub sprints: StorageKey,
    /// Key of the note list snapshot.
    pub notes: StorageKey,
}
