//! Sign-in callback

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::auth::{CurrentIdentity, CurrentProfile};
use crate::error::HttpAppError;
use crate::state::AppState;
use zloom_core::models::AuthenticatedUser;

/// Fetch the caller's user, provisioning it (with a FREE subscription and a
/// personal workspace) on first sign-in
#[utoipa::path(
    post,
    path = "/api/v0/auth/callback",
    responses(
        (status = 200, description = "Existing user", body = AuthenticatedUser),
        (status = 201, description = "User provisioned", body = AuthenticatedUser),
        (status = 400, description = "Token carries no email claim"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
#[tracing::instrument(skip(state, identity, profile))]
pub async fn auth_callback(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    CurrentProfile(profile): CurrentProfile,
) -> Result<impl IntoResponse, HttpAppError> {
    let authenticated = state
        .users
        .authenticate(identity.as_ref(), &profile)
        .await?;

    let status = if authenticated.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(authenticated)))
}
