//! When steps for sprint board BDD scenarios.

use super::world::SprintBoardWorld;
use chrono::Duration;
use eyre::WrapErr;
use mockable::Clock;
use rstest_bdd_macros::when;
use sprintboard::board::domain::{Column, SprintSchedule};

#[when(r#"the task "{description}" is selected"#)]
fn task_is_selected(world: &mut SprintBoardWorld, description: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&description)?;
    match world.workspace.toggle_task_selection(&task_id) {
        Some(true) => Ok(()),
        other => Err(eyre::eyre!("expected {description:?} to become selected, got {other:?}")),
    }
}

#[when(r#"a sprint "{name}" lasting {days:i64} days is created from the selection"#)]
fn sprint_from_selection(
    world: &mut SprintBoardWorld,
    name: String,
    days: i64,
) -> Result<(), eyre::Report> {
    let now = world.clock.utc();
    let schedule = SprintSchedule::new(now, now + Duration::days(days))
        .wrap_err("build sprint schedule")?;
    let sprint = world
        .workspace
        .create_sprint_from_selection(name.clone(), schedule)
        .wrap_err("create sprint from selection")?
        .into_value();
    world.sprints.insert(name, sprint.id().clone());
    Ok(())
}

#[when(r#"the task "{description}" moves from "{from}" to "{to}" in "{sprint}""#)]
fn task_moves(
    world: &mut SprintBoardWorld,
    description: String,
    from: String,
    to: String,
    sprint: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&description)?;
    let sprint_id = world.sprint_id(&sprint)?;
    let source = Column::try_from(from.as_str())
        .map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))?;
    let target = Column::try_from(to.as_str())
        .map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))?;

    let moved = world
        .workspace
        .move_task_within_board(&sprint_id, &task_id, source, target, usize::MAX);
    if !moved.is_clean() || !*moved.value() {
        return Err(eyre::eyre!("move of {description:?} did not apply: {moved:?}"));
    }
    Ok(())
}

#[when("{days:i64} days pass")]
fn days_pass(world: &mut SprintBoardWorld, days: i64) {
    world.clock.advance(Duration::days(days));
}

#[when("statuses are refreshed")]
fn statuses_refreshed(world: &mut SprintBoardWorld) -> Result<(), eyre::Report> {
    let outcome = world.workspace.refresh_statuses();
    if !outcome.is_clean() {
        return Err(eyre::eyre!("refresh raised warnings: {:?}", outcome.warnings()));
    }
    Ok(())
}

#[when(r#"the sprint "{sprint}" is deleted"#)]
fn sprint_deleted(world: &mut SprintBoardWorld, sprint: String) -> Result<(), eyre::Report> {
    let sprint_id = world.sprint_id(&sprint)?;
    world
        .workspace
        .delete_sprint(&sprint_id)
        .into_value()
        .ok_or_else(|| eyre::eyre!("sprint {sprint:?} was not deleted"))?;
    Ok(())
}

#[when("the workspace is reopened")]
fn workspace_reopened(world: &mut SprintBoardWorld) {
    world.reopen();
}
