use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use zloom_core::models::{Folder, FolderInfo, FolderResponse, DEFAULT_FOLDER_NAME};
use zloom_core::AppError;

/// Repository for managing folders
#[derive(Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the folders of a workspace by name, each with its video count
    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "select"))]
    pub async fn list_with_counts(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<FolderResponse>, AppError> {
        let folders = sqlx::query_as::<Postgres, FolderResponse>(
            r#"
            SELECT f.id, f.workspace_id, f.name, f.created_at, f.updated_at,
                   COUNT(v.id) AS video_count
            FROM folders f
            LEFT JOIN videos v ON v.folder_id = f.id
            WHERE f.workspace_id = $1
            GROUP BY f.id
            ORDER BY f.name ASC
            "#,
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(folders)
    }

    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "insert"))]
    pub async fn create(&self, workspace_id: Uuid) -> Result<Folder, AppError> {
        let folder = sqlx::query_as::<Postgres, Folder>(
            r#"
            INSERT INTO folders (workspace_id, name)
            VALUES ($1, $2)
            RETURNING id, workspace_id, name, created_at, updated_at
            "#,
        )
        .bind(workspace_id)
        .bind(DEFAULT_FOLDER_NAME)
        .fetch_one(&self.pool)
        .await?;

        Ok(folder)
    }

    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "select", db.record_id = %id))]
    pub async fn find(&self, id: Uuid) -> Result<Option<Folder>, AppError> {
        let folder = sqlx::query_as::<Postgres, Folder>(
            "SELECT id, workspace_id, name, created_at, updated_at FROM folders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(folder)
    }

    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "update", db.record_id = %id))]
    pub async fn rename(&self, id: Uuid, name: &str) -> Result<Option<Folder>, AppError> {
        let folder = sqlx::query_as::<Postgres, Folder>(
            r#"
            UPDATE folders SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, workspace_id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(folder)
    }

    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "select", db.record_id = %id))]
    pub async fn info(&self, id: Uuid) -> Result<Option<FolderInfo>, AppError> {
        let info = sqlx::query_as::<Postgres, FolderInfo>(
            r#"
            SELECT f.name, COUNT(v.id) AS video_count
            FROM folders f
            LEFT JOIN videos v ON v.folder_id = f.id
            WHERE f.id = $1
            GROUP BY f.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(info)
    }
}
