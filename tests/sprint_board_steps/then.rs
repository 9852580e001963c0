//! Then steps for sprint board BDD scenarios.

use super::world::{SprintBoardWorld, names};
use rstest_bdd_macros::then;
use sprintboard::board::domain::{Column, SprintStatus, Task};
use sprintboard::workspace::ports::StorageKey;

fn descriptions(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(Task::description).collect()
}

#[then(r#"the "{column}" column of "{sprint}" lists "{tasks}""#)]
fn column_lists(
    world: &SprintBoardWorld,
    column: String,
    sprint: String,
    tasks: String,
) -> Result<(), eyre::Report> {
    let column_kind = Column::try_from(column.as_str())
        .map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))?;
    let sprint_id = world.sprint_id(&sprint)?;
    let board = world
        .workspace
        .board()
        .sprint(&sprint_id)
        .ok_or_else(|| eyre::eyre!("sprint {sprint:?} is not on the board"))?;

    let actual = descriptions(board.columns().column(column_kind));
    if actual != names(&tasks) {
        return Err(eyre::eyre!("{column} of {sprint:?} holds {actual:?}, expected {tasks:?}"));
    }
    Ok(())
}

#[then(r#"the pool lists "{tasks}""#)]
fn pool_lists(world: &SprintBoardWorld, tasks: String) -> Result<(), eyre::Report> {
    let actual = descriptions(world.workspace.board().pool());
    if actual != names(&tasks) {
        return Err(eyre::eyre!("pool holds {actual:?}, expected {tasks:?}"));
    }
    Ok(())
}

#[then("the selection is empty")]
fn selection_is_empty(world: &SprintBoardWorld) -> Result<(), eyre::Report> {
    let selection = world.workspace.board().selection();
    if !selection.is_empty() {
        return Err(eyre::eyre!("selection still holds {selection:?}"));
    }
    Ok(())
}

#[then(r#"the sprint "{sprint}" is "{status}""#)]
fn sprint_status_is(
    world: &SprintBoardWorld,
    sprint: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = SprintStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let sprint_id = world.sprint_id(&sprint)?;
    let actual = world.workspace.sprint_status(&sprint_id);
    if actual != Some(expected) {
        return Err(eyre::eyre!("sprint {sprint:?} is {actual:?}, expected {expected}"));
    }
    Ok(())
}

#[then(r#"the stored status of "{sprint}" is "{status}""#)]
fn stored_status_is(
    world: &SprintBoardWorld,
    sprint: String,
    status: String,
) -> Result<(), eyre::Report> {
    let sprint_id = world.sprint_id(&sprint)?;
    let key = StorageKey::new("sprints")?;
    let payload = world
        .store
        .payload(&key)?
        .ok_or_else(|| eyre::eyre!("no sprint snapshot stored"))?;
    let records: serde_json::Value = serde_json::from_str(&payload)?;
    let stored = records
        .as_array()
        .and_then(|all| all.iter().find(|record| record["id"] == sprint_id.as_str()))
        .and_then(|record| record["status"].as_str())
        .ok_or_else(|| eyre::eyre!("sprint {sprint:?} missing from snapshot"))?;
    if stored != status {
        return Err(eyre::eyre!("stored status is {stored:?}, expected {status:?}"));
    }
    Ok(())
}

#[then("the board is consistent")]
fn board_is_consistent(world: &SprintBoardWorld) -> Result<(), eyre::Report> {
    world
        .workspace
        .board()
        .check_consistency()
        .map_err(|err| eyre::eyre!("board is inconsistent: {err}"))
}
