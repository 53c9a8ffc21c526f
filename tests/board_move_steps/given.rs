//! Given steps for board move BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::domain::StatusId;

#[given("a workspace without configured statuses")]
fn workspace_without_statuses(world: &mut BoardWorld) {
    let _ = world;
}

#[given(r#"task "{id}" in column "{column}" at position {position:i64}"#)]
fn task_in_column(
    world: &mut BoardWorld,
    id: String,
    column: String,
    position: i64,
) -> Result<(), eyre::Report> {
    let task = world.task(&id, Some(StatusId::new(column)?), position)?;
    world.tasks.seed(vec![task]);
    Ok(())
}

#[given(r#"task "{id}" without a column at position {position:i64}"#)]
fn task_without_column(
    world: &mut BoardWorld,
    id: String,
    position: i64,
) -> Result<(), eyre::Report> {
    let task = world.task(&id, None, position)?;
    world.tasks.seed(vec![task]);
    Ok(())
}

#[given("the board is loaded")]
fn board_is_loaded(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    run_async(world.controller.load(world.project_id.clone())).wrap_err("load scenario board")
}

#[given("the remote store rejects writes")]
fn remote_rejects_writes(world: &mut BoardWorld) {
    world.tasks.reject_writes("scenario rejection");
}
