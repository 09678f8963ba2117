//! Workspace access verification

use std::sync::Arc;
use uuid::Uuid;
use zloom_core::models::Workspace;
use zloom_core::{AccessError, Identity};
use zloom_db::WorkspaceAccessStore;

/// Decides whether an identity may act on a workspace: it must be the owner
/// or hold a membership. Has no side effects.
#[derive(Clone)]
pub struct AccessVerifier {
    store: Arc<dyn WorkspaceAccessStore>,
}

impl AccessVerifier {
    pub fn new(store: Arc<dyn WorkspaceAccessStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip_all, fields(workspace_id = %workspace_id))]
    pub async fn verify_access(
        &self,
        identity: Option<&Identity>,
        workspace_id: Uuid,
    ) -> Result<Workspace, AccessError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;

        match self
            .store
            .find_accessible_workspace(identity.subject(), workspace_id)
            .await
        {
            Ok(Some(workspace)) => Ok(workspace),
            Ok(None) => {
                tracing::debug!(identity = %identity, "Workspace access denied");
                Err(AccessError::NotFound)
            }
            Err(e) => {
                tracing::error!(identity = %identity, error = %e, "Workspace access check failed");
                Err(AccessError::unavailable(e))
            }
        }
    }
}
