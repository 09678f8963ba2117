use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_FOLDER_NAME: &str = "Untitled Folder";

/// Folder model for organizing videos inside a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Folder {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Folder response with additional metadata
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FolderResponse {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub video_count: Option<i64>,
}

/// Folder name and size, as shown in the folder header
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FolderInfo {
    pub name: String,
    pub video_count: i64,
}

/// Request DTO for renaming a folder
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RenameFolderRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Folder name must be between 1 and 255 characters"
    ))]
    pub name: String,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        FolderResponse {
            id: folder.id,
            workspace_id: folder.workspace_id,
            name: folder.name,
            created_at: folder.created_at,
            updated_at: folder.updated_at,
            video_count: None,
        }
    }
}
