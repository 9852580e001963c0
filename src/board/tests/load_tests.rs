//! Tests for rebuilding a board from persisted collections.

use super::fixtures::{column_ids, noon, pool_ids, sprint, sprint_id, task, task_id, week};
use crate::board::domain::{
    BoardState, Column, LoadedBoard, PersistedSprintData, Sprint, SprintColumns,
    SprintSchedule, SprintStatus, TaskLocation,
};
use chrono::Duration;
use rstest::rstest;

fn stored_sprint(raw: &str, schedule: SprintSchedule, columns: SprintColumns) -> Sprint {
    Sprint::from_persisted(
        PersistedSprintData {
            id: sprint_id(raw),
            name: format!("Sprint {raw}"),
            schedule,
            columns,
        },
        noon(),
    )
}

#[rstest]
fn from_parts_indexes_every_task(week: SprintSchedule) {
    let columns = SprintColumns::new(vec![task("a")], vec![task("b")], vec![task("c")]);

    let LoadedBoard { board, dropped } =
        BoardState::from_parts(vec![task("p")], vec![stored_sprint("s1", week, columns)], noon());

    assert!(dropped.is_empty());
    assert_eq!(board.task_count(), 4);
    assert_eq!(
        board.location(&task_id("b")),
        Some(&TaskLocation::Sprint {
            sprint_id: sprint_id("s1"),
            column: Column::InProgress,
        })
    );
    assert!(board.selection().is_empty());
    assert_eq!(board.check_consistency(), Ok(()));
}

#[rstest]
fn from_parts_keeps_first_copy_of_duplicated_task(week: SprintSchedule) {
    let first = SprintColumns::new(vec![task("x")], Vec::new(), vec![task("a")]);
    let second = SprintColumns::new(vec![task("a"), task("y")], Vec::new(), Vec::new());

    let LoadedBoard { board, dropped } = BoardState::from_parts(
        vec![task("x")],
        vec![stored_sprint("s1", week, first), stored_sprint("s2", week, second)],
        noon(),
    );

    assert_eq!(dropped, vec![task_id("x"), task_id("a")]);
    assert_eq!(pool_ids(&board), vec!["x"]);
    assert_eq!(column_ids(sprint(&board, "s1"), Column::Done), vec!["a"]);
    assert_eq!(column_ids(sprint(&board, "s2"), Column::Open), vec!["y"]);
    assert_eq!(board.check_consistency(), Ok(()));
}

#[rstest]
fn from_parts_dissolves_sprint_with_repeated_identifier(week: SprintSchedule) {
    let first = SprintColumns::new(vec![task("a")], Vec::new(), Vec::new());
    let repeat = SprintColumns::new(vec![task("b")], vec![task("c")], Vec::new());

    let LoadedBoard { board, dropped } = BoardState::from_parts(
        Vec::new(),
        vec![stored_sprint("s1", week, first), stored_sprint("s1", week, repeat)],
        noon(),
    );

    assert!(dropped.is_empty());
    assert_eq!(board.sprints().len(), 1);
    assert_eq!(pool_ids(&board), vec!["b", "c"]);
    assert_eq!(board.check_consistency(), Ok(()));
}

#[rstest]
fn from_parts_derives_status_at_load_time(week: SprintSchedule) {
    let columns = SprintColumns::new(vec![task("a")], Vec::new(), Vec::new());
    let late = week.end() + Duration::days(1);

    let LoadedBoard { board, .. } =
        BoardState::from_parts(Vec::new(), vec![stored_sprint("s1", week, columns)], late);

    assert_eq!(sprint(&board, "s1").recorded_status(), SprintStatus::OutOfTrack);
}
