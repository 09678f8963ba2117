//! Current-user handlers: profile, search, notifications and settings

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::auth::CurrentIdentity;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use zloom_core::models::{
    FirstViewResponse, FirstViewSetting, NotificationsResponse, UserProfile, UserSearchQuery,
    UserSearchResult,
};

#[utoipa::path(
    get,
    path = "/api/v0/users/me",
    responses(
        (status = 200, description = "Caller's profile", body = UserProfile),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "User not provisioned", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<impl IntoResponse, HttpAppError> {
    let profile = state.users.profile(identity.as_ref()).await?;
    Ok(Json(profile))
}

/// Search users by first name, last name or email
#[utoipa::path(
    get,
    path = "/api/v0/users/search",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive substring")
    ),
    responses(
        (status = 200, description = "Matching users, excluding the caller", body = Vec<UserSearchResult>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(state, identity, query))]
pub async fn search_users(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Query(query): Query<UserSearchQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let users = state
        .users
        .search(identity.as_ref(), query.q.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/api/v0/users/me/notifications",
    responses(
        (status = 200, description = "Notifications and their count", body = NotificationsResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<impl IntoResponse, HttpAppError> {
    let notifications = state.users.notifications(identity.as_ref()).await?;
    Ok(Json(notifications))
}

#[utoipa::path(
    get,
    path = "/api/v0/users/me/first-view",
    responses(
        (status = 200, description = "First-view notification preference", body = FirstViewSetting),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn get_first_view(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<impl IntoResponse, HttpAppError> {
    let enabled = state.users.first_view(identity.as_ref()).await?;
    Ok(Json(FirstViewSetting { enabled }))
}

#[utoipa::path(
    put,
    path = "/api/v0/users/me/first-view",
    request_body = FirstViewSetting,
    responses(
        (status = 200, description = "Preference updated", body = FirstViewResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[tracing::instrument(skip(state, identity, setting))]
pub async fn set_first_view(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    ValidatedJson(setting): ValidatedJson<FirstViewSetting>,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = state
        .users
        .set_first_view(identity.as_ref(), setting.enabled)
        .await?;
    Ok(Json(response))
}
