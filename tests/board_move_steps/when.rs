//! When steps for board move BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::board::domain::{MoveIntent, StatusId, TaskId};

#[when(r#"task "{id}" is moved to index {index:usize} of column "{column}""#)]
fn task_is_moved(
    world: &mut BoardWorld,
    id: String,
    index: usize,
    column: String,
) -> Result<(), eyre::Report> {
    let intent = MoveIntent::new(TaskId::new(id)?, StatusId::new(column)?, index);
    let result = run_async(world.controller.move_task(intent));
    world.last_move = Some(result);
    Ok(())
}
