//! HTTP tests for task creation and status updates.

use super::helpers::{ADMIN_EMAIL, Api, FUTURE_DUE, PAST_DUE, USER_EMAIL, message_of};
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::json;
use taskboard::identity::{domain::Role, services::RegisterUserRequest};
use taskboard::task::domain::Progression;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_creates_a_todo_task_with_default_priority() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;

    let (status, body) = api
        .send(
            Method::POST,
            "/tasks",
            Some(&admin.token),
            Some(json!({
                "project_id": project,
                "assigned_to": user.id,
                "title": "Draft announcement",
                "description": "Blog and newsletter",
                "due_date": FUTURE_DUE,
            })),
        )
        .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "TODO");
    assert_eq!(body["priority"], "MEDIUM");
    assert_eq!(body["due_date"], FUTURE_DUE);
    assert_eq!(body["assigned_to"], user.id.as_str());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_cannot_create_tasks() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;

    let (status, body) = api
        .send(
            Method::POST,
            "/tasks",
            Some(&user.token),
            Some(json!({
                "project_id": project,
                "assigned_to": user.id,
                "title": "Self-assigned",
                "due_date": FUTURE_DUE,
            })),
        )
        .await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(message_of(&body), "Forbidden");
    Ok(())
}

#[rstest]
#[case(json!({ "title": "   ", "due_date": FUTURE_DUE }))]
#[case(json!({ "title": "Dated", "due_date": "31/12/2999" }))]
#[case(json!({ "title": "Urgent", "due_date": FUTURE_DUE, "priority": "CRITICAL" }))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_task_fields_are_unprocessable(
    #[case] fields: serde_json::Value,
) -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;
    let mut body = json!({ "project_id": project, "assigned_to": user.id });
    if let (Some(target), Some(extra)) = (body.as_object_mut(), fields.as_object()) {
        target.extend(extra.clone());
    }

    let (status, _) = api
        .send(Method::POST, "/tasks", Some(&admin.token), Some(body))
        .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_moves_own_task_and_sees_choices() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;
    let task = api.create_task(&admin, &project, &user, FUTURE_DUE).await?;

    let (status, body) = api.put_status(&user, &task, "WIP").await?;
    let (listed, mine) = api
        .send(Method::GET, "/my-tasks", Some(&user.token), None)
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "WIP");
    assert_eq!(listed, StatusCode::OK);
    assert_eq!(mine[0]["id"], task.as_str());
    assert_eq!(mine[0]["project"]["name"], "Launch");
    assert_eq!(mine[0]["available_statuses"], json!(["TODO", "WIP", "DONE"]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strangers_are_forbidden_from_changing_status() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    api.state
        .auth()
        .register(RegisterUserRequest::new(
            "Other",
            "other@test.com",
            "password",
            Role::User,
        ))
        .await?;
    let other = api.login("other@test.com").await?;
    let project = api.create_project(&admin, "Launch").await?;
    let task = api.create_task(&admin, &project, &user, FUTURE_DUE).await?;

    let (status, body) = api.put_status(&other, &task, "DONE").await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(message_of(&body), "Forbidden");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_rules_apply_over_http() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;
    let task = api.create_task(&admin, &project, &user, PAST_DUE).await?;
    let (swept, _) = api
        .send(Method::POST, "/mark-overdue", Some(&admin.token), None)
        .await?;

    let (reopen, reopen_body) = api.put_status(&user, &task, "TODO").await?;
    let (member_close, member_body) = api.put_status(&user, &task, "DONE").await?;
    let (admin_close, admin_body) = api.put_status(&admin, &task, "DONE").await?;

    assert_eq!(swept, StatusCode::OK);
    assert_eq!(reopen, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        message_of(&reopen_body),
        "Overdue tasks cannot go back to WIP/TODO"
    );
    assert_eq!(member_close, StatusCode::FORBIDDEN);
    assert_eq!(message_of(&member_body), "Only admin can close overdue tasks");
    assert_eq!(admin_close, StatusCode::OK);
    assert_eq!(admin_body["status"], "DONE");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn forward_only_refuses_backward_moves() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::ForwardOnly).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;
    let task = api.create_task(&admin, &project, &user, FUTURE_DUE).await?;
    api.put_status(&user, &task, "DONE").await?;

    let (status, body) = api.put_status(&user, &task, "WIP").await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        message_of(&body),
        "Tasks can only move forward from TODO to WIP to DONE"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bad_status_requests_are_reported() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;
    let task = api.create_task(&admin, &project, &user, FUTURE_DUE).await?;

    let (unknown, unknown_body) = api.put_status(&user, &task, "BLOCKED").await?;
    let (missing, missing_body) = api
        .send(
            Method::PUT,
            &format!("/tasks/{task}"),
            Some(&user.token),
            Some(json!({})),
        )
        .await?;
    let (absent, absent_body) = api
        .put_status(&user, "00000000-0000-0000-0000-000000000000", "WIP")
        .await?;
    let (malformed, _) = api.put_status(&user, "not-a-uuid", "WIP").await?;

    assert_eq!(unknown, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(message_of(&unknown_body), "The selected status is invalid.");
    assert_eq!(missing, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(message_of(&missing_body), "The status field is required.");
    assert_eq!(absent, StatusCode::NOT_FOUND);
    assert_eq!(message_of(&absent_body), "Task not found");
    assert_eq!(malformed, StatusCode::NOT_FOUND);
    Ok(())
}
