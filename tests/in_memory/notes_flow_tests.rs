//! Note flows over the in-memory store.

use super::helpers::{clock, open, store};
use rstest::rstest;
use sprintboard::notes::domain::{NoteDraft, NotePatch};
use sprintboard::workspace::adapters::{InMemorySnapshotStore, ManualClock};
use std::sync::Arc;

#[rstest]
fn notes_are_independent_of_the_board(
    store: InMemorySnapshotStore,
    clock: Arc<ManualClock>,
) -> Result<(), eyre::Report> {
    let mut workspace = open(&store, &clock)?;
    let note = workspace
        .add_note(NoteDraft::new("Standup", "Blocked on review").with_tags("daily, ,team"))?
        .into_value();
    assert_eq!(note.tags(), ["daily".to_owned(), "team".to_owned()]);

    let edited = workspace.edit_note(note.id(), &NotePatch::new().with_description("Unblocked"));
    assert!(edited.into_value());

    let reopened = open(&store, &clock)?;
    let stored = reopened
        .notes()
        .get(note.id())
        .ok_or_else(|| eyre::eyre!("note missing after reopen"))?;
    assert_eq!(stored.description(), "Unblocked");
    assert_eq!(stored.tags(), note.tags());
    assert!(reopened.board().pool().is_empty());
    Ok(())
}
