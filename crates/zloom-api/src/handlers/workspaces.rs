//! Workspace handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::CurrentIdentity;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use zloom_core::models::{CreateWorkspaceRequest, Workspace, WorkspacesResponse};

/// List the caller's plan, owned workspaces and memberships
#[utoipa::path(
    get,
    path = "/api/v0/workspaces",
    responses(
        (status = 200, description = "Workspaces visible to the caller", body = WorkspacesResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "workspaces"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn list_workspaces(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = state.workspaces.list(identity.as_ref()).await?;
    Ok(Json(response))
}

/// Create a shared workspace (PRO plan only)
#[utoipa::path(
    post,
    path = "/api/v0/workspaces",
    request_body = CreateWorkspaceRequest,
    responses(
        (status = 201, description = "Workspace created", body = Workspace),
        (status = 400, description = "Invalid name", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 402, description = "PRO subscription required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "workspaces"
)]
#[tracing::instrument(skip(state, identity, request))]
pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    ValidatedJson(request): ValidatedJson<CreateWorkspaceRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let workspace = state.workspaces.create(identity.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(workspace)))
}

/// Verify the caller may access a workspace and return it
#[utoipa::path(
    get,
    path = "/api/v0/workspaces/{id}",
    params(
        ("id" = Uuid, Path, description = "Workspace ID")
    ),
    responses(
        (status = 200, description = "Caller is owner or member", body = Workspace),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Workspace not found or not accessible", body = ErrorResponse),
        (status = 503, description = "Access could not be verified", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "workspaces"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn get_workspace(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let workspace = state.workspaces.get(identity.as_ref(), id).await?;
    Ok(Json(workspace))
}
