//! Then steps for board move BDD scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::then;
use taskboard::board::{
    domain::{Placement, StatusId, TaskId},
    services::BoardError,
};

fn split(list: &str) -> Vec<String> {
    list.split(',').map(|item| item.trim().to_owned()).collect()
}

#[then(r#"column "{column}" lists "{expected}""#)]
fn column_lists(world: &BoardWorld, column: String, expected: String) -> Result<(), eyre::Report> {
    let actual = world.column(&column)?;
    eyre::ensure!(
        actual == split(&expected),
        "column {column}: expected {expected}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"column "{column}" still lists "{expected}" when read again"#)]
fn column_still_lists(
    world: &BoardWorld,
    column: String,
    expected: String,
) -> Result<(), eyre::Report> {
    let first = world.column(&column)?;
    let second = world.column(&column)?;
    eyre::ensure!(first == second, "column order changed between reads");
    eyre::ensure!(
        second == split(&expected),
        "column {column}: expected {expected}, found {second:?}"
    );
    Ok(())
}

#[then(r#"task "{id}" is in column "{column}" at position {position:i64}"#)]
fn task_is_placed(
    world: &BoardWorld,
    id: String,
    column: String,
    position: i64,
) -> Result<(), eyre::Report> {
    let task = world
        .controller
        .task(&TaskId::new(id)?)
        .ok_or_else(|| eyre::eyre!("task missing from board"))?;
    let expected = Placement::new(Some(StatusId::new(column)?), position);
    eyre::ensure!(
        task.placement() == expected,
        "expected {expected:?}, found {:?}",
        task.placement()
    );
    Ok(())
}

#[then(r#"the columns are "{expected}""#)]
fn columns_are(world: &BoardWorld, expected: String) -> Result<(), eyre::Report> {
    let actual: Vec<String> = world
        .controller
        .board()
        .columns()
        .iter()
        .map(|column| column.status.id.to_string())
        .collect();
    eyre::ensure!(
        actual == split(&expected),
        "expected columns {expected}, found {actual:?}"
    );
    Ok(())
}

#[then("a move rejection is reported")]
fn move_rejection_is_reported(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    eyre::ensure!(
        matches!(result, Err(BoardError::MoveRejected { .. })),
        "expected MoveRejected, got {result:?}"
    );
    eyre::ensure!(
        matches!(
            world.controller.snapshot().error,
            Some(BoardError::MoveRejected { .. })
        ),
        "rejection was not recorded on the board"
    );
    Ok(())
}
