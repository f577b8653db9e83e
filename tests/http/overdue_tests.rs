//! HTTP tests for the overdue sweep and board statistics.

use super::helpers::{ADMIN_EMAIL, Api, FUTURE_DUE, PAST_DUE, USER_EMAIL, message_of};
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::json;
use taskboard::task::domain::Progression;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_reports_and_lists_overdue_tasks() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;
    let late = api.create_task(&admin, &project, &user, PAST_DUE).await?;
    api.create_task(&admin, &project, &user, FUTURE_DUE).await?;

    let (first, first_body) = api
        .send(Method::POST, "/mark-overdue", Some(&admin.token), None)
        .await?;
    let (_, second_body) = api
        .send(Method::POST, "/mark-overdue", Some(&admin.token), None)
        .await?;
    let (listed, overdue) = api
        .send(Method::GET, "/overdue-tasks", Some(&admin.token), None)
        .await?;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(first_body, json!({ "marked": 1 }));
    assert_eq!(second_body, json!({ "marked": 0 }));
    assert_eq!(listed, StatusCode::OK);
    assert_eq!(overdue.as_array().map(Vec::len), Some(1));
    assert_eq!(overdue[0]["id"], late.as_str());
    assert_eq!(overdue[0]["status"], "OVERDUE");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_task_offers_assignee_nothing_to_pick() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;
    api.create_task(&admin, &project, &user, PAST_DUE).await?;
    api.send(Method::POST, "/mark-overdue", Some(&admin.token), None)
        .await?;

    let (_, mine) = api
        .send(Method::GET, "/my-tasks", Some(&user.token), None)
        .await?;

    assert_eq!(mine[0]["status"], "OVERDUE");
    assert_eq!(mine[0]["available_statuses"], json!(["OVERDUE"]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stats_are_zero_filled() -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let admin = api.login(ADMIN_EMAIL).await?;
    let user = api.login(USER_EMAIL).await?;
    let project = api.create_project(&admin, "Launch").await?;
    api.create_task(&admin, &project, &user, FUTURE_DUE).await?;

    let (status, body) = api
        .send(Method::GET, "/stats", Some(&admin.token), None)
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "by_status": { "TODO": 1, "WIP": 0, "DONE": 0, "OVERDUE": 0 },
            "total": 1,
        })
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_cannot_run_the_sweep(
    #[values("/mark-overdue", "/overdue-tasks", "/stats")] uri: &str,
) -> Result<(), eyre::Report> {
    let api = Api::seeded(Progression::Permissive).await?;
    let user = api.login(USER_EMAIL).await?;
    let method = if uri == "/mark-overdue" {
        Method::POST
    } else {
        Method::GET
    };

    let (status, body) = api.send(method, uri, Some(&user.token), None).await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(message_of(&body), "Forbidden");
    Ok(())
}
