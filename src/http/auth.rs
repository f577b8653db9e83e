//! Bearer-token extractors that resolve the acting user per request.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use super::{error::ApiError, state::AppState};
use crate::identity::{domain::Actor, ports::SessionToken};

/// The authenticated caller and the token they presented.
#[derive(Debug, Clone)]
pub struct Authenticated {
    /// The acting user.
    pub actor: Actor,
    /// The bearer token on the request.
    pub token: SessionToken,
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(ApiError::unauthenticated)?;
        let actor = state.auth().authenticate(&token).await?;
        Ok(Self { actor, token })
    }
}

/// An authenticated caller with the admin role.
///
/// Rejects other callers with 403 before the request body is read.
#[derive(Debug, Clone, Copy)]
pub struct AdminActor(pub Actor);

impl FromRequestParts<AppState> for AdminActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Authenticated { actor, .. } = Authenticated::from_request_parts(parts, state).await?;
        if actor.is_admin() {
            Ok(Self(actor))
        } else {
            tracing::warn!(actor = %actor.id(), path = %parts.uri.path(), "admin route refused");
            Err(ApiError::forbidden())
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let trimmed = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !trimmed.is_empty())
        .then(|| SessionToken::from_bearer(trimmed))
}
