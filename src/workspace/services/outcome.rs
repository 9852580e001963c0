//! Operation results carrying non-fatal persistence warnings.

use crate::workspace::ports::StorageKey;
use std::fmt;
use thiserror::Error;

/// A persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// The unassigned task pool.
    Tasks,
    /// The sprint list with every board.
    Sprints,
    /// The note list.
    Notes,
}

impl Collection {
    /// Returns the collection name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Sprints => "sprints",
            Self::Notes => "notes",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step of the persistence round trip that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistencePhase {
    /// Reading the payload from the store.
    Load,
    /// Parsing a loaded payload.
    Decode,
    /// Serializing a collection.
    Encode,
    /// Writing the payload to the store.
    Save,
}

impl PersistencePhase {
    /// Returns the phase name used in log fields and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Decode => "decode",
            Self::Encode => "encode",
            Self::Save => "save",
        }
    }
}

impl fmt::Display for PersistencePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persistence failure that did not stop the in-memory operation.
///
/// After a failed save, memory and the stored snapshot disagree until the
/// next successful save of the same collection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{phase} of {collection} snapshot '{key}' failed: {message}")]
pub struct PersistenceWarning {
    /// The affected collection.
    pub collection: Collection,
    /// Storage key of the collection.
    pub key: String,
    /// The failing step.
    pub phase: PersistencePhase,
    /// Rendered underlying error.
    pub message: String,
}

impl PersistenceWarning {
    /// Creates a warning from an underlying error.
    #[must_use]
    pub fn new(
        collection: Collection,
        key: &StorageKey,
        phase: PersistencePhase,
        err: &dyn std::error::Error,
    ) -> Self {
        Self {
            collection,
            key: key.as_str().to_owned(),
            phase,
            message: err.to_string(),
        }
    }
}

/// Value of a workspace operation plus any persistence warnings it raised.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Outcome<T> {
    value: T,
    warnings: Vec<PersistenceWarning>,
}

impl<T> Outcome<T> {
    /// Creates an outcome with the given warnings.
    pub const fn new(value: T, warnings: Vec<PersistenceWarning>) -> Self {
        Self { value, warnings }
    }

    /// Creates an outcome without warnings.
    pub const fn clean(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// Returns the operation value.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Returns the persistence warnings.
    #[must_use]
    pub fn warnings(&self) -> &[PersistenceWarning] {
        &self.warnings
    }

    /// Returns whether every persistence step succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Discards the warnings and returns the value.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Splits the outcome into value and warnings.
    #[must_use]
    pub fn into_parts(self) -> (T, Vec<PersistenceWarning>) {
        (self.value, self.warnings)
    }
}
