//! End-to-end planning flows over the in-memory store.

use super::helpers::{clock, open, sprint_days, store};
use chrono::Duration;
use rstest::rstest;
use sprintboard::board::domain::{Column, Priority, SprintStatus, TaskLocation, TaskPatch};
use sprintboard::workspace::adapters::{InMemorySnapshotStore, ManualClock};
use std::sync::Arc;

#[rstest]
fn two_week_sprint_lifecycle(
    store: InMemorySnapshotStore,
    clock: Arc<ManualClock>,
) -> Result<(), eyre::Report> {
    let mut workspace = open(&store, &clock)?;
    let mut ids = Vec::new();
    for (description, priority) in [
        ("Design API", Priority::High),
        ("Build API", Priority::Critical),
        ("Docs", Priority::Low),
        ("Later", Priority::Medium),
    ] {
        ids.push(workspace.add_task(description, priority)?.into_value().id().clone());
    }
    let [design, build, docs, later] = <[_; 4]>::try_from(ids)
        .map_err(|_| eyre::eyre!("expected four tasks"))?;

    let sprint = workspace
        .create_sprint("Sprint 14", sprint_days(14)?, &[design.clone(), build.clone()])?
        .into_value();
    let added = workspace.add_tasks_to_sprint(sprint.id(), &[docs.clone()])?;
    assert_eq!(*added.value(), 1);

    let s = sprint.id();
    assert!(workspace.move_task_within_board(s, &design, Column::Open, Column::Done, 0).into_value());
    assert!(
        workspace
            .move_task_within_board(s, &build, Column::Open, Column::InProgress, 0)
            .into_value()
    );
    assert!(workspace.send_task_to_pool(&docs).into_value());
    assert!(workspace.edit_task(&later, &TaskPatch::new().with_priority(Priority::High)).into_value());

    clock.advance(Duration::days(15));
    assert_eq!(workspace.sprint_status(s), Some(SprintStatus::OutOfTrack));
    assert!(
        workspace
            .move_task_within_board(s, &build, Column::InProgress, Column::Done, 5)
            .into_value()
    );
    assert_eq!(workspace.sprint_status(s), Some(SprintStatus::Completed));

    let reopened = open(&store, &clock)?;
    let board = reopened.board();
    assert_eq!(board.sprints(), workspace.board().sprints());
    assert_eq!(board.location(&docs), Some(&TaskLocation::Pool));
    assert_eq!(board.task(&later).map(|task| task.priority()), Some(Priority::High));
    assert_eq!(board.check_consistency(), Ok(()));
    Ok(())
}

#[rstest]
fn selection_is_not_persisted(
    store: InMemorySnapshotStore,
    clock: Arc<ManualClock>,
) -> Result<(), eyre::Report> {
    let mut workspace = open(&store, &clock)?;
    let task = workspace.add_task("Pick me", Priority::Low)?.into_value();
    assert_eq!(workspace.toggle_task_selection(task.id()), Some(true));

    let reopened = open(&store, &clock)?;

    assert!(reopened.board().selection().is_empty());
    Ok(())
}

#[rstest]
fn deleting_selected_pool_task_leaves_selection_clean(
    store: InMemorySnapshotStore,
    clock: Arc<ManualClock>,
) -> Result<(), eyre::Report> {
    let mut workspace = open(&store, &clock)?;
    let keep = workspace.add_task("Keep", Priority::Low)?.into_value();
    let discard = workspace.add_task("Drop", Priority::Low)?.into_value();
    workspace.toggle_task_selection(keep.id());
    workspace.toggle_task_selection(discard.id());

    assert!(workspace.delete_task(discard.id()).into_value().is_some());
    let sprint = workspace
        .create_sprint_from_selection("From selection", sprint_days(3)?)?
        .into_value();

    assert_eq!(sprint.columns().open().len(), 1);
    assert_eq!(workspace.board().check_consistency(), Ok(()));
    Ok(())
}

#[rstest]
fn deleting_from_sprint_removes_task_everywhere(
    store: InMemorySnapshotStore,
    clock: Arc<ManualClock>,
) -> Result<(), eyre::Report> {
    let mut workspace = open(&store, &clock)?;
    let task = workspace.add_task("Scrapped", Priority::Low)?.into_value();
    workspace.create_sprint("S", sprint_days(2)?, &[task.id().clone()])?;

    assert!(workspace.delete_task_from_sprint(task.id()).into_value().is_some());

    let reopened = open(&store, &clock)?;
    assert_eq!(reopened.board().task_count(), 0);
    assert_eq!(reopened.board().sprints().len(), 1);
    Ok(())
}
