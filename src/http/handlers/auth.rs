//! Login, logout, and current-user endpoints.

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::http::{
    auth::Authenticated,
    dto::{LoginBody, LoginResponse, MessageResponse, UserResponse},
    error::ApiError,
    state::AppState,
};
use crate::identity::services::LoginRequest;

/// `POST /login`: exchanges credentials for a bearer token.
///
/// # Errors
///
/// Returns 401 `Invalid credentials` when the email or password is wrong.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = payload?;
    let session = state
        .auth()
        .login(LoginRequest::new(body.email, body.password))
        .await?;
    Ok(Json(LoginResponse {
        token: session.token.as_str().to_owned(),
        user: UserResponse::from(&session.user),
    }))
}

/// `POST /logout`: revokes the presented token.
///
/// # Errors
///
/// Returns 401 when the token is not active.
pub async fn logout(
    State(state): State<AppState>,
    caller: Authenticated,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth().logout(&caller.token).await?;
    tracing::info!(user_id = %caller.actor.id(), "logged out");
    Ok(Json(MessageResponse::new("Logged out")))
}

/// `GET /me`: returns the caller's account.
///
/// # Errors
///
/// Returns 401 when the token is not active.
pub async fn me(
    State(state): State<AppState>,
    caller: Authenticated,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth().me(&caller.actor).await?;
    Ok(Json(UserResponse::from(&user)))
}
