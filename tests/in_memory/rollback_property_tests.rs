//! Rollback exactness across a spread of board layouts.

use super::helpers::{Board, project, sid, status, task, tid};
use rstest::rstest;
use taskboard::board::{
    domain::{MoveIntent, Placement, Task},
    services::BoardError,
};

fn layout(seed: i64) -> Vec<Task> {
    vec![
        task("a", Some("left"), seed),
        task("b", Some("left"), seed * 3),
        task("c", None, seed * 7),
        task("d", Some("right"), -seed),
        task("e", Some("right"), seed * 11),
    ]
}

#[rstest]
#[case(2, "a", Some("right"), 1)]
#[case(5, "c", Some("right"), 0)]
#[case(9, "d", None, 0)]
#[case(13, "e", Some("left"), 2)]
#[case(40, "b", Some("left"), 0)]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_restores_exact_placement(
    #[case] seed: i64,
    #[case] moved: &str,
    #[case] target: Option<&str>,
    #[case] index: usize,
) {
    let board = Board::with(
        layout(seed),
        vec![status("left", "Left", 1), status("right", "Right", 2)],
    );
    let controller = &board.controller;
    controller.load(project()).await.expect("load should succeed");
    let before: Vec<Placement> = controller
        .snapshot()
        .tasks
        .iter()
        .map(Task::placement)
        .collect();
    board.tasks.reject_writes("rejected");

    let intent = MoveIntent {
        task_id: tid(moved),
        target_status_id: target.map(sid),
        target_index: index,
    };
    let pending = controller
        .begin_move(intent)
        .expect("move should apply locally");
    assert!(pending.placement().is_some());
    let result = pending.persist().await;

    assert!(matches!(result, Err(BoardError::MoveRejected { .. })));
    let after: Vec<Placement> = controller
        .snapshot()
        .tasks
        .iter()
        .map(Task::placement)
        .collect();
    assert_eq!(after, before);
}
