//! HTTP tests for project administration.

use super::helpers::{ADMIN_EMAIL, Api, FUTURE_DUE, USER_EMAIL, message_of};
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::json;
use taskboard::task::domain::Progression;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_lists_projects_with_creator_and_tasks() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;
    api.create_task(&admin, &project, &user, FUTURE_DUE).await?;

    let (status, body) = api
        .send(Method::GET, "/projects", Some(&admin.token), None)
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], project.as_str());
    assert_eq!(body[0]["creator"]["id"], admin.id.as_str());
    assert_eq!(body[0]["tasks"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_detail_includes_assignees_and_choices() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;
    let task = api.create_task(&admin, &project, &user, FUTURE_DUE).await?;

    let (status, body) = api
        .send(
            Method::GET,
            &format!("/projects/{project}"),
            Some(&admin.token),
            None,
        )
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Launch");
    assert_eq!(body["tasks"][0]["id"], task.as_str());
    assert_eq!(body["tasks"][0]["assignee"]["id"], user.id.as_str());
    assert_eq!(
        body["tasks"][0]["available_statuses"],
        json!(["TODO", "WIP", "DONE"])
    );
    Ok(())
}

#[rstest]
#[case(Method::GET, "/projects")]
#[case(Method::POST, "/projects")]
#[case(Method::GET, "/projects/00000000-0000-0000-0000-000000000000")]
#[case(Method::DELETE, "/projects/00000000-0000-0000-0000-000000000000")]
#[tokio::test(flavor = "multi_thread")]
async fn members_are_kept_out_of_project_administration(
    #[case] method: Method,
    #[case] uri: &str,
) -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let user = api.login(USER_EMAIL).await?;

    let (status, body) = api
        .send(method, uri, Some(&user.token), Some(json!({ "name": "Mine" })))
        .await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(message_of(&body), "Forbidden");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_project_names_are_unprocessable() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;

    let (status, _) = api
        .send(
            Method::POST,
            "/projects",
            Some(&admin.token),
            Some(json!({ "name": "  " })),
        )
        .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_drops_its_tasks() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;
    let task = api.create_task(&admin, &project, &user, FUTURE_DUE).await?;
    let uri = format!("/projects/{project}");

    let (deleted, deleted_body) = api
        .send(Method::DELETE, &uri, Some(&admin.token), None)
        .await?;
    let (shown, shown_body) = api.send(Method::GET, &uri, Some(&admin.token), None).await?;
    let (_, mine) = api
        .send(Method::GET, "/my-tasks", Some(&user.token), None)
        .await?;
    let (orphan, _) = api.put_status(&user, &task, "WIP").await?;

    assert_eq!(deleted, StatusCode::OK);
    assert_eq!(message_of(&deleted_body), "Deleted");
    assert_eq!(shown, StatusCode::NOT_FOUND);
    assert_eq!(message_of(&shown_body), "Project not found");
    assert_eq!(mine, json!([]));
    assert_eq!(orphan, StatusCode::NOT_FOUND);
    Ok(())
}
