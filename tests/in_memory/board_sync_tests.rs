//! In-memory integration tests for board synchronization.

use super::helpers::{Board, column, empty_board, project, sid, status, task, tid};
use rstest::rstest;
use taskboard::board::{
    domain::{MoveIntent, NewTask, Placement, Priority},
    services::{BoardError, LoadState, MoveOutcome},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_workspace_renders_fallback_pipeline(empty_board: Board) {
    empty_board
        .tasks
        .seed(vec![task("t1", None, 1), task("t2", Some("review"), 1)]);

    empty_board
        .controller
        .load(project())
        .await
        .expect("load should succeed");

    let board = empty_board.controller.board();
    let names: Vec<&str> = board
        .columns()
        .iter()
        .map(|column| column.status.id.as_str())
        .collect();
    assert_eq!(names, vec!["todo", "briefing", "doing", "review", "done"]);
    assert_eq!(column(&empty_board.controller, "todo"), vec!["t1"]);
    assert_eq!(column(&empty_board.controller, "review"), vec!["t2"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_sequence_is_persisted_move_by_move() {
    let board = Board::with(
        vec![
            task("design", Some("ideas"), 100),
            task("build", Some("ideas"), 200),
            task("ship", Some("ideas"), 300),
        ],
        vec![status("wip", "Doing", 2), status("ideas", "Ideas", 1)],
    );
    let controller = &board.controller;
    controller.load(project()).await.expect("load should succeed");

    controller
        .move_task(MoveIntent::new(tid("ship"), sid("ideas"), 0))
        .await
        .expect("reorder commits");
    controller
        .move_task(MoveIntent::new(tid("design"), sid("wip"), 0))
        .await
        .expect("cross-column move commits");

    assert_eq!(column(controller, "ideas"), vec!["ship", "build"]);
    assert_eq!(column(controller, "wip"), vec!["design"]);
    assert_eq!(
        board.tasks.get(&tid("ship")).map(|t| t.placement()),
        Some(Placement::new(Some(sid("ideas")), 99))
    );
    assert_eq!(
        board.tasks.get(&tid("design")).map(|t| t.placement()),
        Some(Placement::new(Some(sid("wip")), 1))
    );
    assert_eq!(board.tasks.update_calls(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_reverts_visible_order(empty_board: Board) {
    empty_board
        .tasks
        .seed(vec![task("t1", Some("todo"), 1), task("t2", Some("todo"), 2)]);
    let controller = &empty_board.controller;
    controller.load(project()).await.expect("load should succeed");
    empty_board.tasks.reject_writes("network unreachable");

    let result = controller
        .move_task(MoveIntent::new(tid("t1"), sid("done"), 0))
        .await;

    assert!(matches!(result, Err(BoardError::MoveRejected { .. })));
    assert_eq!(column(controller, "todo"), vec!["t1", "t2"]);
    assert!(column(controller, "done").is_empty());
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.load_state, LoadState::Loaded);
    assert!(
        snapshot
            .error
            .as_ref()
            .is_some_and(BoardError::is_user_visible)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_replaces_local_state_with_remote(empty_board: Board) {
    empty_board.tasks.seed(vec![task("t1", Some("todo"), 1)]);
    let controller = &empty_board.controller;
    controller.load(project()).await.expect("load should succeed");
    empty_board.tasks.seed(vec![task("t1", Some("doing"), 4)]);

    controller.load(project()).await.expect("reload should succeed");

    assert_eq!(column(controller, "doing"), vec!["t1"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_survives_reload(empty_board: Board) {
    let controller = &empty_board.controller;
    controller.load(project()).await.expect("load should succeed");

    let created = controller
        .add_task(
            NewTask::new("Draft homepage copy")
                .expect("valid title")
                .with_priority(Priority::High)
                .with_labels(vec!["copy".to_owned()]),
        )
        .await
        .expect("creation commits");
    controller.load(project()).await.expect("reload should succeed");

    let reloaded = controller.task(created.id()).expect("task persisted");
    assert_eq!(reloaded.priority(), Priority::High);
    assert_eq!(reloaded.status_id(), None);
    assert_eq!(column(controller, "todo"), vec![created.id().to_string()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_task_moves_it_to_the_last_column(empty_board: Board) {
    empty_board.tasks.seed(vec![task("t1", None, 1)]);
    let controller = &empty_board.controller;
    controller.load(project()).await.expect("load should succeed");

    let outcome = controller
        .set_completed(tid("t1"), true)
        .await
        .expect("completion commits");

    assert_eq!(
        outcome,
        MoveOutcome::Committed(Placement::new(Some(sid("done")), 1))
    );
    assert_eq!(column(controller, "done"), vec!["t1"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_fetch_failure_surfaces_load_failure(empty_board: Board) {
    empty_board.statuses.reject_listing("permission denied");

    let result = empty_board.controller.load(project()).await;

    assert!(matches!(result, Err(BoardError::LoadFailure(_))));
    assert_eq!(
        empty_board.controller.snapshot().load_state,
        LoadState::Failed
    );
}
