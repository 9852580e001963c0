//! Domain model for notes.

mod error;
mod note;
mod notebook;
mod tags;

pub use error::NoteDomainError;
pub use note::{Note, NoteDraft, NoteId, NotePatch};
pub use notebook::NoteBook;
pub use tags::parse_tags;
