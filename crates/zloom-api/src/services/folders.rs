//! Folder operations, guarded on the folder's workspace

use uuid::Uuid;
use validator::Validate;
use zloom_core::models::{Folder, FolderInfo, FolderResponse, RenameFolderRequest};
use zloom_core::{AccessError, AppError, Identity};
use zloom_db::FolderRepository;

use super::access::AccessVerifier;

#[derive(Clone)]
pub struct FolderService {
    access: AccessVerifier,
    folders: FolderRepository,
}

impl FolderService {
    pub fn new(access: AccessVerifier, folders: FolderRepository) -> Self {
        Self { access, folders }
    }

    pub async fn list(
        &self,
        identity: Option<&Identity>,
        workspace_id: Uuid,
    ) -> Result<Vec<FolderResponse>, AppError> {
        self.access.verify_access(identity, workspace_id).await?;
        self.folders.list_with_counts(workspace_id).await
    }

    pub async fn create(
        &self,
        identity: Option<&Identity>,
        workspace_id: Uuid,
    ) -> Result<Folder, AppError> {
        self.access.verify_access(identity, workspace_id).await?;
        let folder = self.folders.create(workspace_id).await?;
        tracing::info!(workspace_id = %workspace_id, folder_id = %folder.id, "Folder created");
        Ok(folder)
    }

    pub async fn rename(
        &self,
        identity: Option<&Identity>,
        folder_id: Uuid,
        request: RenameFolderRequest,
    ) -> Result<Folder, AppError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;
        let request = RenameFolderRequest {
            name: request.name.trim().to_string(),
        };
        request.validate()?;

        self.guard(Some(identity), folder_id).await?;
        self.folders
            .rename(folder_id, &request.name)
            .await?
            .ok_or_else(folder_not_found)
    }

    pub async fn info(
        &self,
        identity: Option<&Identity>,
        folder_id: Uuid,
    ) -> Result<FolderInfo, AppError> {
        self.guard(identity, folder_id).await?;
        self.folders.info(folder_id).await?.ok_or_else(folder_not_found)
    }

    /// Resolve a folder and check access to the workspace holding it.
    ///
    /// A folder in a workspace the caller cannot reach is reported exactly
    /// like a folder that does not exist.
    pub(crate) async fn guard(
        &self,
        identity: Option<&Identity>,
        folder_id: Uuid,
    ) -> Result<Folder, AppError> {
        // Checked first so an anonymous caller learns nothing about folder ids.
        if identity.is_none() {
            return Err(AccessError::Unauthenticated.into());
        }
        let folder = self
            .folders
            .find(folder_id)
            .await?
            .ok_or_else(folder_not_found)?;
        self.access
            .verify_access(identity, folder.workspace_id)
            .await
            .map_err(|e| match e {
                AccessError::NotFound => folder_not_found(),
                other => other.into(),
            })?;
        Ok(folder)
    }
}

fn folder_not_found() -> AppError {
    AppError::NotFound("Folder not found".to_string())
}
