//! In-memory snapshot store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workspace::ports::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult, StorageKey};

/// Thread-safe in-memory snapshot store.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what a workspace wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    entries: Arc<RwLock<HashMap<StorageKey, String>>>,
}

impl InMemorySnapshotStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the payload stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] when the lock is poisoned.
    pub fn payload(&self, key: &StorageKey) -> SnapshotStoreResult<Option<String>> {
        self.load(key)
    }

    /// Returns the number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] when the lock is poisoned.
    pub fn len(&self) -> SnapshotStoreResult<usize> {
        let entries = self.entries.read().map_err(|err| {
            SnapshotStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.len())
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self, key: &StorageKey) -> SnapshotStoreResult<Option<String>> {
        let entries = self.entries.read().map_err(|err| {
            SnapshotStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &StorageKey, payload: &str) -> SnapshotStoreResult<()> {
        let mut entries = self.entries.write().map_err(|err| {
            SnapshotStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        entries.insert(key.clone(), payload.to_owned());
        Ok(())
    }
}
