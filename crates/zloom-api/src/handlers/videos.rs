//! Video handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::CurrentIdentity;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use zloom_core::models::{
    MoveVideoRequest, RecordViewResponse, Video, VideoListItem, VideoPreview,
};

/// List videos in a workspace or folder, oldest first
///
/// The id may name either a workspace or a folder.
#[utoipa::path(
    get,
    path = "/api/v0/workspaces/{id}/videos",
    params(
        ("id" = Uuid, Path, description = "Workspace or folder ID")
    ),
    responses(
        (status = 200, description = "Videos in scope", body = Vec<VideoListItem>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Workspace not found or not accessible", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "videos"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn list_workspace_videos(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = state.videos.list(identity.as_ref(), id).await?;
    Ok(Json(videos))
}

/// Preview a video from a share link
#[utoipa::path(
    get,
    path = "/api/v0/videos/{id}",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video preview", body = VideoPreview),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "videos"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn get_preview_video(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let preview = state.videos.preview(identity.as_ref(), id).await?;
    Ok(Json(preview))
}

/// Move a video to another workspace and optionally into one of its folders
#[utoipa::path(
    patch,
    path = "/api/v0/videos/{id}/location",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body = MoveVideoRequest,
    responses(
        (status = 200, description = "Video moved", body = Video),
        (status = 400, description = "Folder outside the target workspace", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Video, folder or workspace not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "videos"
)]
#[tracing::instrument(skip(state, identity, request))]
pub async fn move_video(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<MoveVideoRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state.videos.relocate(identity.as_ref(), id, request).await?;
    Ok(Json(video))
}

/// Count a view of a shared video
///
/// The first view by someone other than the author notifies the author.
#[utoipa::path(
    post,
    path = "/api/v0/videos/{id}/views",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "View recorded", body = RecordViewResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "videos"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn record_view(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = state.videos.record_view(identity.as_ref(), id).await?;
    Ok(Json(response))
}
