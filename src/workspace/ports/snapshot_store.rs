//! Snapshot persistence port keyed by storage key.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for snapshot store operations.
pub type SnapshotStoreResult<T> = Result<T, SnapshotStoreError>;

/// Key under which one collection snapshot is stored.
///
/// Keys are non-empty and contain no whitespace or path separators, so
/// file-backed stores can use them directly as file stems.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Creates a validated storage key.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::InvalidKey`] when the value is empty or
    /// contains whitespace, `/`, or `\`.
    pub fn new(value: impl Into<String>) -> SnapshotStoreResult<Self> {
        let raw = value.into();
        let is_valid = !raw.is_empty()
            && !raw
                .chars()
                .any(|ch| ch.is_whitespace() || ch == '/' || ch == '\\')
            && raw != "."
            && raw != "..";
        if !is_valid {
            return Err(SnapshotStoreError::InvalidKey(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key-value persistence for serialized collection snapshots.
///
/// Calls are synchronous and run to completion; a failed save is reported
/// to the caller and never retried.
pub trait SnapshotStore {
    /// Loads the payload stored under `key`.
    ///
    /// Returns `None` when nothing has been stored under the key yet.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] when the backing store
    /// cannot be read.
    fn load(&self, key: &StorageKey) -> SnapshotStoreResult<Option<String>>;

    /// Replaces the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] when the backing store
    /// cannot be written.
    fn save(&self, key: &StorageKey, payload: &str) -> SnapshotStoreResult<()>;
}

/// Errors returned by snapshot store implementations.
#[derive(Debug, Clone, Error)]
pub enum SnapshotStoreError {
    /// The storage key is not usable.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Two collections are configured to share one storage key.
    #[error("storage key '{0}' is assigned to more than one collection")]
    SharedKey(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SnapshotStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
