//! Error types for note validation.

use super::NoteId;
use thiserror::Error;

/// Errors returned by note constructors and the note book.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteDomainError {
    /// A note identifier was empty after trimming.
    #[error("note identifier must not be empty")]
    EmptyIdentifier,

    /// A note with the same identifier already exists.
    #[error("duplicate note identifier: {0}")]
    DuplicateNote(NoteId),
}
