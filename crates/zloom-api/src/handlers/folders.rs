//! Folder handlers

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
use zloom_core::models::{FolderInfo, FolderResponse, RenameFolderRequest};

/// List a workspace's folders with their video counts
#[utoipa::path(
    get,
    path = "/api/v0/workspaces/{id}/folders",
    params(
        ("id" = Uuid, Path, description = "Workspace ID")
    ),
    responses(
        (status = 200, description = "Folders ordered by name", body = Vec<FolderResponse>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Workspace not found or not accessible", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "folders"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn list_folders(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(workspace_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let folders = state.folders.list(identity.as_ref(), workspace_id).await?;
    Ok(Json(folders))
}

/// Create an "Untitled Folder" in a workspace
#[utoipa::path(
    post,
    path = "/api/v0/workspaces/{id}/folders",
    params(
        ("id" = Uuid, Path, description = "Workspace ID")
    ),
    responses(
        (status = 201, description = "Folder created", body = FolderResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Workspace not found or not accessible", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "folders"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(workspace_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let folder = state.folders.create(identity.as_ref(), workspace_id).await?;
    Ok((StatusCode::CREATED, Json(FolderResponse::from(folder))))
}

/// Get a folder's name and video count
#[utoipa::path(
    get,
    path = "/api/v0/folders/{id}",
    params(
        ("id" = Uuid, Path, description = "Folder ID")
    ),
    responses(
        (status = 200, description = "Folder info", body = FolderInfo),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Folder not found or not accessible", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "folders"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn get_folder_info(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let info = state.folders.info(identity.as_ref(), id).await?;
    Ok(Json(info))
}

#[utoipa::path(
    patch,
    path = "/api/v0/folders/{id}",
    params(
        ("id" = Uuid, Path, description = "Folder ID")
    ),
    request_body = RenameFolderRequest,
    responses(
        (status = 200, description = "Folder renamed", body = FolderResponse),
        (status = 400, description = "Invalid name", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Folder not found or not accessible", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "folders"
)]
#[tracing::instrument(skip(state, identity, request))]
pub async fn rename_folder(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<RenameFolderRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let folder = state.folders.rename(identity.as_ref(), id, request).await?;
    Ok(Json(FolderResponse::from(folder)))
}
