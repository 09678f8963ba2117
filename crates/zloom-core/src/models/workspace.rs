use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::subscription::SubscriptionPlan;

/// Workspace type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "workspace_type", rename_all = "UPPERCASE")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkspaceType {
    /// Created automatically for every user on first sign-in
    Personal,
    /// Created explicitly by PRO users and shared through invites
    Public,
}

/// Workspace entity. Visible to its owner and to users holding a membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Workspace {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub workspace_type: WorkspaceType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct WorkspaceSummary {
    pub id: Uuid,
    pub name: String,
    pub workspace_type: WorkspaceType,
}

impl From<Workspace> for WorkspaceSummary {
    fn from(workspace: Workspace) -> Self {
        WorkspaceSummary {
            id: workspace.id,
            name: workspace.name,
            workspace_type: workspace.workspace_type,
        }
    }
}

/// Workspaces visible to the caller, split by relation
#[derive(Debug, Serialize, ToSchema)]
pub struct WorkspacesResponse {
    pub plan: Option<SubscriptionPlan>,
    pub owned: Vec<WorkspaceSummary>,
    pub member_of: Vec<WorkspaceSummary>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateWorkspaceRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Workspace name must be between 1 and 255 characters"
    ))]
    pub name: String,
}
