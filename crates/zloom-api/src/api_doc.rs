//! OpenAPI documentation.
//! Paths in handler annotations use the literal /api/v0; they are rewritten
//! at runtime when `API_VERSION` changes.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::constants::API_VERSION;
use crate::error;
use crate::handlers;
use zloom_core::models;

const OPENAPI_PATH_PLACEHOLDER: &str = "/api/v0";

fn transform_openapi_paths(spec: &mut utoipa::openapi::OpenApi, version: &str) {
    let replacement = format!("/api/{}", version);
    if OPENAPI_PATH_PLACEHOLDER == replacement {
        return;
    }
    let path_map = std::mem::take(&mut spec.paths.paths);
    for (key, item) in path_map {
        let new_key = key.replacen(OPENAPI_PATH_PLACEHOLDER, &replacement, 1);
        spec.paths.paths.insert(new_key, item);
    }
}

/// Returns the OpenAPI spec with path placeholders replaced by the current API version.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();
    transform_openapi_paths(&mut spec, API_VERSION);
    spec
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Zloom API",
        version = "0.1.0",
        description = "Workspace backend for Zloom screen recordings: workspaces, invites, folders, videos and comments. All endpoints are versioned under /api/v0/ and authenticated with the identity provider's bearer JWT."
    ),
    paths(
        // Auth
        handlers::auth::auth_callback,
        // Workspaces
        handlers::workspaces::list_workspaces,
        handlers::workspaces::create_workspace,
        handlers::workspaces::get_workspace,
        // Invites
        handlers::invites::invite_member,
        handlers::invites::accept_invite,
        // Folders
        handlers::folders::list_folders,
        handlers::folders::create_folder,
        handlers::folders::get_folder_info,
        handlers::folders::rename_folder,
        // Videos
        handlers::videos::list_workspace_videos,
        handlers::videos::get_preview_video,
        handlers::videos::move_video,
        handlers::videos::record_view,
        // Comments
        handlers::comments::list_comments,
        handlers::comments::post_comment,
        // Users
        handlers::users::get_profile,
        handlers::users::search_users,
        handlers::users::list_notifications,
        handlers::users::get_first_view,
        handlers::users::set_first_view,
    ),
    components(
        schemas(
            models::User,
            models::UserSummary,
            models::AuthenticatedUser,
            models::UserProfile,
            models::UserSearchResult,
            models::FirstViewSetting,
            models::FirstViewResponse,
            models::SubscriptionPlan,
            models::Workspace,
            models::WorkspaceType,
            models::WorkspaceSummary,
            models::WorkspacesResponse,
            models::CreateWorkspaceRequest,
            models::Membership,
            models::CreateInviteRequest,
            models::InviteResponse,
            models::AcceptInviteResponse,
            models::FolderResponse,
            models::FolderInfo,
            models::RenameFolderRequest,
            models::Video,
            models::FolderRef,
            models::VideoListItem,
            models::VideoAuthor,
            models::VideoPreview,
            models::MoveVideoRequest,
            models::RecordViewResponse,
            models::CommentResponse,
            models::CommentThread,
            models::PostCommentRequest,
            models::Notification,
            models::NotificationsResponse,
            error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Sign-in callback and user provisioning"),
        (name = "workspaces", description = "Workspace listing, creation and access checks"),
        (name = "invites", description = "Inviting collaborators and accepting invites"),
        (name = "folders", description = "Folder management inside a workspace"),
        (name = "videos", description = "Video listing, relocation, share-link previews and view counting"),
        (name = "comments", description = "Comment threads on videos"),
        (name = "users", description = "Profile, search, notifications and settings")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_versioned_paths() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/v0/invites/{id}/accept"));
        assert!(spec.paths.paths.contains_key("/api/v0/workspaces/{id}"));
        assert!(spec.paths.paths.contains_key("/api/v0/videos/{id}/views"));
    }

    #[test]
    fn test_transform_rewrites_prefix() {
        let mut spec = ApiDoc::openapi();
        transform_openapi_paths(&mut spec, "v1");
        assert!(spec.paths.paths.contains_key("/api/v1/invites/{id}/accept"));
        assert!(!spec.paths.paths.keys().any(|k| k.starts_with("/api/v0")));
    }
}
