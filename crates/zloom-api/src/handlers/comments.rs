//! Comment handlers

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
use zloom_core::models::{CommentResponse, CommentThread, PostCommentRequest};

#[utoipa::path(
    get,
    path = "/api/v0/videos/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Top-level comments with their replies", body = Vec<CommentThread>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let threads = state.comments.list(identity.as_ref(), id).await?;
    Ok(Json(threads))
}

/// Post a comment, or a reply when `parent_id` is set
#[utoipa::path(
    post,
    path = "/api/v0/videos/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Video ID")
    ),
    request_body = PostCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Invalid comment", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Video or parent comment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
#[tracing::instrument(skip(state, identity, request))]
pub async fn post_comment(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<PostCommentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let comment = state.comments.post(identity.as_ref(), id, request).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
