//! Workspace directory: listing and creation

use uuid::Uuid;
use validator::Validate;
use zloom_core::models::{
    CreateWorkspaceRequest, SubscriptionPlan, Workspace, WorkspaceSummary, WorkspaceType,
    WorkspacesResponse,
};
use zloom_core::{AccessError, AppError, Identity};
use zloom_db::{UserRepository, WorkspaceRepository};

use super::access::AccessVerifier;
use super::users::resolve_user;

#[derive(Clone)]
pub struct WorkspaceService {
    access: AccessVerifier,
    users: UserRepository,
    workspaces: WorkspaceRepository,
}

impl WorkspaceService {
    pub fn new(access: AccessVerifier, users: UserRepository, workspaces: WorkspaceRepository) -> Self {
        Self {
            access,
            users,
            workspaces,
        }
    }

    pub async fn list(&self, identity: Option<&Identity>) -> Result<WorkspacesResponse, AppError> {
        let user = resolve_user(&self.users, identity).await?;
        let plan = self.users.get_plan(user.id).await?;
        let owned = self
            .workspaces
            .list_owned(user.id)
            .await?
            .into_iter()
            .map(WorkspaceSummary::from)
            .collect();
        let member_of = self.workspaces.list_member_of(user.id).await?;

        Ok(WorkspacesResponse {
            plan,
            owned,
            member_of,
        })
    }

    pub async fn get(
        &self,
        identity: Option<&Identity>,
        workspace_id: Uuid,
    ) -> Result<Workspace, AppError> {
        Ok(self.access.verify_access(identity, workspace_id).await?)
    }

    /// Create a PUBLIC workspace. Only PRO subscribers may do so.
    #[tracing::instrument(skip_all)]
    pub async fn create(
        &self,
        identity: Option<&Identity>,
        request: CreateWorkspaceRequest,
    ) -> Result<Workspace, AppError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;
        let request = CreateWorkspaceRequest {
            name: request.name.trim().to_string(),
        };
        request.validate()?;

        let user = resolve_user(&self.users, Some(identity)).await?;
        let plan = self.users.get_plan(user.id).await?;
        if !plan.is_some_and(SubscriptionPlan::can_create_workspaces) {
            return Err(AppError::SubscriptionRequired(
                "Creating workspaces requires a PRO subscription".to_string(),
            ));
        }

        let workspace = self
            .workspaces
            .create(user.id, &request.name, WorkspaceType::Public)
            .await?;
        tracing::info!(user_id = %user.id, workspace_id = %workspace.id, "Workspace created");
        Ok(workspace)
    }
}
