//! Invite handlers

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
use zloom_core::models::{AcceptInviteResponse, CreateInviteRequest, InviteResponse};

/// Invite a user into a workspace and email them the accept link
#[utoipa::path(
    post,
    path = "/api/v0/workspaces/{id}/invites",
    params(
        ("id" = Uuid, Path, description = "Workspace ID")
    ),
    request_body = CreateInviteRequest,
    responses(
        (status = 201, description = "Invite created", body = InviteResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Workspace or recipient not found", body = ErrorResponse),
        (status = 409, description = "Recipient already invited or a member", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "invites"
)]
#[tracing::instrument(skip(state, identity, request))]
pub async fn invite_member(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(workspace_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateInviteRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let invite = state
        .invite_sender
        .invite_member(identity.as_ref(), workspace_id, request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(invite.to_response("Invite sent")),
    ))
}

/// Accept an invite as its designated receiver
#[utoipa::path(
    post,
    path = "/api/v0/invites/{id}/accept",
    params(
        ("id" = Uuid, Path, description = "Invite ID")
    ),
    responses(
        (status = 200, description = "Invite accepted, membership created", body = AcceptInviteResponse),
        (status = 401, description = "Missing token or unknown invite", body = ErrorResponse),
        (status = 403, description = "Caller is not the invite's receiver", body = ErrorResponse),
        (status = 409, description = "Invite already accepted", body = ErrorResponse),
        (status = 500, description = "Acceptance transaction failed", body = ErrorResponse),
        (status = 503, description = "Invite could not be loaded", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "invites"
)]
#[tracing::instrument(skip(state, identity))]
pub async fn accept_invite(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let membership = state
        .invite_acceptor
        .accept_invite(identity.as_ref(), id)
        .await?;
    Ok(Json(AcceptInviteResponse {
        message: "Invite accepted".to_string(),
        membership,
    }))
}
