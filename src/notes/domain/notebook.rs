//! Ordered collection of notes.

use super::{Note, NoteDomainError, NoteId, NotePatch};
use tracing::warn;

/// Notes in insertion order, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteBook {
    notes: Vec<Note>,
}

impl NoteBook {
    /// Creates an empty note book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a note book from persisted notes, keeping the first note for
    /// each identifier.
    #[must_use]
    pub fn from_notes(notes: Vec<Note>) -> Self {
        let mut book = Self::default();
        for note in notes {
            if let Err(err) = book.add(note) {
                warn!(error = %err, "dropping duplicate note");
            }
        }
        book
    }

    /// Returns every note in insertion order.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Finds a note by identifier.
    #[must_use]
    pub fn get(&self, note_id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == note_id)
    }

    /// Returns the number of notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns whether there are no notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Appends a note.
    ///
    /// # Errors
    ///
    /// Returns [`NoteDomainError::DuplicateNote`] when the identifier is
    /// already in use.
    pub fn add(&mut self, note: Note) -> Result<(), NoteDomainError> {
        if self.get(note.id()).is_some() {
            return Err(NoteDomainError::DuplicateNote(note.id().clone()));
        }
        self.notes.push(note);
        Ok(())
    }

    /// Merges `patch` into a note, returning whether it changed. Unknown
    /// identifiers are ignored.
    pub fn edit(&mut self, note_id: &NoteId, patch: &NotePatch) -> bool {
        self.notes
            .iter_mut()
            .find(|note| note.id() == note_id)
            .is_some_and(|note| note.apply(patch))
    }

    /// Removes a note. Unknown identifiers are ignored.
    pub fn delete(&mut self, note_id: &NoteId) -> Option<Note> {
        let position = self.notes.iter().position(|note| note.id() == note_id)?;
        Some(self.notes.remove(position))
    }
}
