//! Given steps for task status transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::http::{AppState, Repositories};
use taskboard::identity::{domain::Role, services::RegisterUserRequest};
use taskboard::project::services::CreateProjectRequest;
use taskboard::task::{
    domain::{Progression, TaskStatusPolicy},
    services::{CreateTaskRequest, UpdateTaskStatusRequest},
};

#[given(r#"a "{mode}" board with an admin, a member, and a bystander"#)]
fn board_with_accounts(world: &mut TaskTransitionWorld, mode: String) -> Result<(), eyre::Report> {
    let progression = Progression::try_from(mode.as_str())
        .map_err(|err| eyre::eyre!("invalid progression in scenario: {err}"))?;
    world.state = AppState::new(
        &Repositories::in_memory(),
        TaskStatusPolicy::new(progression),
    );

    let accounts = [
        ("admin", "admin@board.test", Role::Admin),
        ("member", "member@board.test", Role::User),
        ("bystander", "bystander@board.test", Role::User),
    ];
    for (name, email, role) in accounts {
        let user = run_async(world.state.auth().register(RegisterUserRequest::new(
            name, email, "secret", role,
        )))
        .wrap_err_with(|| format!("register {name} account"))?;
        world.accounts.insert(name.to_owned(), user);
    }
    Ok(())
}

#[given(r#"a task assigned to the member due "{due}""#)]
fn task_for_member(world: &mut TaskTransitionWorld, due: String) -> Result<(), eyre::Report> {
    let admin = world.actor("admin")?;
    let member = world.actor("member")?;
    let project = run_async(
        world
            .state
            .projects()
            .create(&admin, CreateProjectRequest::new("Scenario project")),
    )
    .wrap_err("create project for transition scenario")?;
    let task = run_async(world.state.tasks().create_task(
        &admin,
        CreateTaskRequest::new(project.id(), member.id(), "Scenario task", due),
    ))
    .wrap_err("create task for transition scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given("the overdue sweep has run")]
fn overdue_sweep_has_run(world: &mut TaskTransitionWorld) -> Result<(), eyre::Report> {
    run_async(world.state.overdue().sweep()).wrap_err("run overdue sweep")?;
    Ok(())
}

#[given(r#"the member has moved the task to "{status}""#)]
fn member_has_moved_task(
    world: &mut TaskTransitionWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let member = world.actor("member")?;
    let task_id = world.task_id()?;
    let moved = run_async(
        world
            .state
            .tasks()
            .update_status(&member, UpdateTaskStatusRequest::new(task_id, status)),
    )
    .wrap_err("move task in scenario setup")?;
    world.task = Some(moved);
    Ok(())
}
