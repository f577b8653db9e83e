//! In-memory integration tests for the overdue sweep and statistics.

use super::helpers::{FUTURE_DUE, PAST_DUE, board};
use taskboard::task::{
    domain::{DenyReason, Progression, TaskDomainError, TaskStatus},
    services::{OverdueError, TaskLifecycleError, UpdateTaskStatusRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_marks_past_due_open_tasks_only() -> Result<(), eyre::Report> {
    let board = board(Progression::Permissive).await?;
    let late = board.assign_to_member("Late", PAST_DUE).await?;
    let finished = board.assign_to_member("Finished", PAST_DUE).await?;
    let upcoming = board.assign_to_member("Upcoming", FUTURE_DUE).await?;
    board
        .state
        .tasks()
        .update_status(
            &board.member.actor(),
            UpdateTaskStatusRequest::new(finished.id(), "DONE"),
        )
        .await?;

    let marked = board.state.overdue().mark_overdue(&board.admin.actor()).await?;
    let overdue = board.state.overdue().list_overdue(&board.admin.actor()).await?;

    eyre::ensure!(marked == 1, "expected one task marked, got {marked}");
    let ids: Vec<_> = overdue.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![late.id()]);
    let upcoming_now = board
        .state
        .tasks()
        .find_by_id(upcoming.id())
        .await?
        .ok_or_else(|| eyre::eyre!("upcoming task vanished"))?;
    assert_eq!(upcoming_now.status(), TaskStatus::Todo);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_task_can_only_be_closed_by_an_admin() -> Result<(), eyre::Report> {
    let board = board(Progression::Permissive).await?;
    let task = board.assign_to_member("Late", PAST_DUE).await?;
    board.state.overdue().sweep().await?;
    let tasks = board.state.tasks();

    let reopen = tasks
        .update_status(
            &board.member.actor(),
            UpdateTaskStatusRequest::new(task.id(), "WIP"),
        )
        .await;
    let member_close = tasks
        .update_status(
            &board.member.actor(),
            UpdateTaskStatusRequest::new(task.id(), "DONE"),
        )
        .await;
    let admin_close = tasks
        .update_status(
            &board.admin.actor(),
            UpdateTaskStatusRequest::new(task.id(), "DONE"),
        )
        .await?;

    assert!(matches!(
        reopen,
        Err(TaskLifecycleError::Domain(TaskDomainError::TransitionDenied {
            reason: DenyReason::OverdueCannotReopen,
            ..
        }))
    ));
    assert!(matches!(
        member_close,
        Err(TaskLifecycleError::Domain(TaskDomainError::TransitionDenied {
            reason: DenyReason::OverdueCloseRequiresAdmin,
            ..
        }))
    ));
    assert_eq!(admin_close.status(), TaskStatus::Done);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stats_count_every_status() -> Result<(), eyre::Report> {
    let board = board(Progression::Permissive).await?;
    board.assign_to_member("Late", PAST_DUE).await?;
    board.assign_to_member("Upcoming", FUTURE_DUE).await?;
    board.state.overdue().sweep().await?;

    let stats = board.state.overdue().stats(&board.admin.actor()).await?;

    assert_eq!(stats.total, 2);
    assert_eq!(stats.count(TaskStatus::Overdue), 1);
    assert_eq!(stats.count(TaskStatus::Todo), 1);
    assert_eq!(stats.count(TaskStatus::Done), 0);
    assert_eq!(stats.by_status.len(), 4);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_cannot_run_admin_reports() -> Result<(), eyre::Report> {
    let board = board(Progression::Permissive).await?;
    let member = board.member.actor();

    assert!(matches!(
        board.state.overdue().mark_overdue(&member).await,
        Err(OverdueError::Forbidden)
    ));
    assert!(matches!(
        board.state.overdue().list_overdue(&member).await,
        Err(OverdueError::Forbidden)
    ));
    assert!(matches!(
        board.state.overdue().stats(&member).await,
        Err(OverdueError::Forbidden)
    ));
    Ok(())
}
