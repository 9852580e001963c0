//! Given steps for sprint board BDD scenarios.

use super::world::{SprintBoardWorld, names};
use chrono::Duration;
use eyre::WrapErr;
use mockable::Clock;
use rstest_bdd_macros::given;
use sprintboard::board::domain::{Priority, SprintSchedule};

#[given("an empty workspace")]
fn empty_workspace(world: &mut SprintBoardWorld) {
    *world = SprintBoardWorld::new();
}

#[given(r#"a pool task "{description}" with priority "{priority}""#)]
fn pool_task(
    world: &mut SprintBoardWorld,
    description: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let level = Priority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let task = world
        .workspace
        .add_task(description.clone(), level)
        .wrap_err("add pool task for scenario setup")?
        .into_value();
    world.tasks.insert(description, task.id().clone());
    Ok(())
}

#[given(r#"a sprint "{name}" lasting {days:i64} days holding "{tasks}""#)]
fn sprint_holding(
    world: &mut SprintBoardWorld,
    name: String,
    days: i64,
    tasks: String,
) -> Result<(), eyre::Report> {
    let ids = names(&tasks)
        .into_iter()
        .map(|description| world.task_id(description))
        .collect::<Result<Vec<_>, _>>()?;
    let now = world.clock.utc();
    let schedule = SprintSchedule::new(now, now + Duration::days(days))
        .wrap_err("build sprint schedule for scenario setup")?;
    let sprint = world
        .workspace
        .create_sprint(name.clone(), schedule, &ids)
        .wrap_err("create sprint for scenario setup")?
        .into_value();
    world.sprints.insert(name, sprint.id().clone());
    Ok(())
}
