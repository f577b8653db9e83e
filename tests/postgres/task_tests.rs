//! Task repository behaviour against `PostgreSQL`.

use crate::postgres::helpers::{Board, FixedClock, board, date};
use chrono::TimeDelta;
use rstest::rstest;
use taskboard::identity::domain::{Actor, Role};
use taskboard::project::ports::ProjectRepository;
use taskboard::task::{
    domain::{TaskStatus, TaskStatusPolicy},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
fn stored_task_round_trips(board: Board) {
    let owner = board.seed_user("owner@test.com");
    let project = board.seed_project(&owner, "Launch");
    let task = board.seed_task(&project, &owner, TaskStatus::Wip, date(2026, 4, 1));

    let loaded = board
        .run(board.tasks.find_by_id(task.id()))
        .expect("lookup task");

    assert_eq!(loaded, Some(task));
}

#[rstest]
fn duplicate_task_id_is_reported(board: Board) {
    let owner = board.seed_user("owner@test.com");
    let project = board.seed_project(&owner, "Launch");
    let task = board.seed_task(&project, &owner, TaskStatus::Todo, date(2026, 4, 1));

    let result = board.run(board.tasks.store(&task));

    assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
}

#[rstest]
fn update_persists_status_and_timestamp(board: Board) {
    let owner = board.seed_user("owner@test.com");
    let project = board.seed_project(&owner, "Launch");
    let mut task = board.seed_task(&project, &owner, TaskStatus::Todo, date(2026, 4, 1));
    let later = board.clock.0 + TimeDelta::hours(1);
    let policy = TaskStatusPolicy::default();
    let actor = Actor::new(owner.id(), Role::User);

    task.change_status(TaskStatus::Done, &actor, &policy, &FixedClock(later))
        .expect("assignee may close the task");
    board.run(board.tasks.update(&task)).expect("update task");

    let loaded = board
        .run(board.tasks.find_by_id(task.id()))
        .expect("lookup task")
        .expect("task exists");
    assert_eq!(loaded.status(), TaskStatus::Done);
    assert_eq!(loaded.updated_at(), later);
}

#[rstest]
fn update_of_missing_task_is_not_found(board: Board) {
    let owner = board.seed_user("owner@test.com");
    let project = board.seed_project(&owner, "Launch");
    let task = board.seed_task(&project, &owner, TaskStatus::Todo, date(2026, 4, 1));
    board
        .run(board.tasks.delete_by_project(project.id()))
        .expect("delete tasks");

    let result = board.run(board.tasks.update(&task));

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
}

#[rstest]
fn lookups_filter_and_order_by_creation(board: Board) {
    let alice = board.seed_user("alice@test.com");
    let bob = board.seed_user("bob@test.com");
    let launch = board.seed_project(&alice, "Launch");
    let docs = board.seed_project(&alice, "Docs");
    let first = board.seed_task(&launch, &alice, TaskStatus::Todo, date(2026, 4, 1));
    let second = board.seed_task(&docs, &bob, TaskStatus::Wip, date(2026, 4, 2));
    let third = board.seed_task(&launch, &alice, TaskStatus::Wip, date(2026, 4, 3));

    let for_alice = board
        .run(board.tasks.find_by_assignee(alice.id()))
        .expect("assignee lookup");
    let in_launch = board
        .run(board.tasks.find_by_project(launch.id()))
        .expect("project lookup");
    let in_progress = board
        .run(board.tasks.find_by_status(TaskStatus::Wip))
        .expect("status lookup");

    assert_eq!(for_alice, vec![first.clone(), third.clone()]);
    assert_eq!(in_launch, vec![first, third.clone()]);
    assert_eq!(in_progress, vec![second, third]);
}

#[rstest]
fn overdue_marking_flips_only_open_past_due_rows(board: Board) {
    let owner = board.seed_user("owner@test.com");
    let project = board.seed_project(&owner, "Launch");
    let late_todo = board.seed_task(&project, &owner, TaskStatus::Todo, date(2026, 3, 9));
    let late_wip = board.seed_task(&project, &owner, TaskStatus::Wip, date(2026, 2, 1));
    let late_done = board.seed_task(&project, &owner, TaskStatus::Done, date(2026, 2, 1));
    let due_today = board.seed_task(&project, &owner, TaskStatus::Todo, date(2026, 3, 10));
    let now = board.clock.0;

    let marked = board
        .run(board.tasks.mark_open_overdue_before(date(2026, 3, 10), now))
        .expect("mark overdue");
    let again = board
        .run(board.tasks.mark_open_overdue_before(date(2026, 3, 10), now))
        .expect("mark overdue again");

    assert_eq!(marked, 2);
    assert_eq!(again, 0);
    assert_eq!(board.status_of(&late_todo), Some(TaskStatus::Overdue));
    assert_eq!(board.status_of(&late_wip), Some(TaskStatus::Overdue));
    assert_eq!(board.status_of(&late_done), Some(TaskStatus::Done));
    assert_eq!(board.status_of(&due_today), Some(TaskStatus::Todo));

    let stamped = board
        .run(board.tasks.find_by_id(late_todo.id()))
        .expect("lookup task")
        .map(|task| task.updated_at());
    assert_eq!(stamped, Some(now));
}

#[rstest]
fn task_closed_before_marking_is_left_done(board: Board) {
    let owner = board.seed_user("owner@test.com");
    let project = board.seed_project(&owner, "Launch");
    let mut task = board.seed_task(&project, &owner, TaskStatus::Wip, date(2026, 3, 1));
    task.change_status(
        TaskStatus::Done,
        &Actor::new(owner.id(), Role::User),
        &TaskStatusPolicy::default(),
        &board.clock,
    )
    .expect("assignee may close the task");
    board.run(board.tasks.update(&task)).expect("update task");

    let marked = board
        .run(board.tasks.mark_open_overdue_before(date(2026, 3, 10), board.clock.0))
        .expect("mark overdue");

    assert_eq!(marked, 0);
    assert_eq!(board.status_of(&task), Some(TaskStatus::Done));
}

#[rstest]
fn counts_group_by_status(board: Board) {
    let owner = board.seed_user("owner@test.com");
    let project = board.seed_project(&owner, "Launch");
    board.seed_task(&project, &owner, TaskStatus::Todo, date(2026, 4, 1));
    board.seed_task(&project, &owner, TaskStatus::Todo, date(2026, 4, 2));
    board.seed_task(&project, &owner, TaskStatus::Overdue, date(2026, 1, 2));

    let counts = board.run(board.tasks.count_by_status()).expect("count tasks");

    assert_eq!(counts.get(&TaskStatus::Todo), Some(&2));
    assert_eq!(counts.get(&TaskStatus::Overdue), Some(&1));
    assert_eq!(counts.get(&TaskStatus::Wip).copied().unwrap_or(0), 0);
}

#[rstest]
fn deleting_by_project_removes_only_that_project(board: Board) {
    let owner = board.seed_user("owner@test.com");
    let launch = board.seed_project(&owner, "Launch");
    let docs = board.seed_project(&owner, "Docs");
    board.seed_task(&launch, &owner, TaskStatus::Todo, date(2026, 4, 1));
    board.seed_task(&launch, &owner, TaskStatus::Done, date(2026, 4, 2));
    let kept = board.seed_task(&docs, &owner, TaskStatus::Todo, date(2026, 4, 3));

    let removed = board
        .run(board.tasks.delete_by_project(launch.id()))
        .expect("delete tasks");
    board
        .run(board.projects.delete(launch.id()))
        .expect("delete project");

    assert_eq!(removed, 2);
    let remaining = board
        .run(board.tasks.find_by_assignee(owner.id()))
        .expect("assignee lookup");
    assert_eq!(remaining, vec![kept]);
}
