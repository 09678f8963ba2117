use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use zloom_core::models::{Workspace, WorkspaceSummary, WorkspaceType};
use zloom_core::AppError;

/// Repository for workspaces and memberships
#[derive(Clone)]
pub struct WorkspaceRepository {
    pool: PgPool,
}

impl WorkspaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load a workspace if the identity owns it or holds a membership on it.
    ///
    /// Absence of the workspace and absence of a relation both yield `None`.
    #[tracing::instrument(skip(self), fields(db.table = "workspaces", db.operation = "select", db.record_id = %workspace_id))]
    pub async fn find_accessible(
        &self,
        subject: &str,
        workspace_id: Uuid,
    ) -> Result<Option<Workspace>, AppError> {
        let workspace = sqlx::query_as::<Postgres, Workspace>(
            r#"
            SELECT w.id, w.owner_id, w.name, w.workspace_type, w.created_at
            FROM workspaces w
            JOIN users owner ON owner.id = w.owner_id
            WHERE w.id = $1
              AND (
                owner.auth_subject = $2
                OR EXISTS (
                    SELECT 1
                    FROM memberships m
                    JOIN users member ON member.id = m.user_id
                    WHERE m.workspace_id = w.id AND member.auth_subject = $2
                )
              )
            "#,
        )
        .bind(workspace_id)
        .bind(subject)
        .fetch_optional(&self.pool)
        .await?;

        Ok(workspace)
    }

    #[tracing::instrument(skip(self), fields(db.table = "workspaces", db.operation = "select"))]
    pub async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<Workspace>, AppError> {
        let workspaces = sqlx::query_as::<Postgres, Workspace>(
            r#"
            SELECT id, owner_id, name, workspace_type, created_at
            FROM workspaces
            WHERE owner_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(workspaces)
    }

    #[tracing::instrument(skip(self), fields(db.table = "memberships", db.operation = "select"))]
    pub async fn list_member_of(&self, user_id: Uuid) -> Result<Vec<WorkspaceSummary>, AppError> {
        let workspaces = sqlx::query_as::<Postgres, WorkspaceSummary>(
            r#"
            SELECT w.id, w.name, w.workspace_type
            FROM memberships m
            JOIN workspaces w ON w.id = m.workspace_id
            WHERE m.user_id = $1
            ORDER BY m.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(workspaces)
    }

    #[tracing::instrument(skip(self), fields(db.table = "workspaces", db.operation = "insert"))]
    pub async fn create(
        &self,
        owner_id: Uuid,
        name: &str,
        workspace_type: WorkspaceType,
    ) -> Result<Workspace, AppError> {
        let workspace = sqlx::query_as::<Postgres, Workspace>(
            r#"
            INSERT INTO workspaces (owner_id, name, workspace_type)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, name, workspace_type, created_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(workspace_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(workspace)
    }

    #[tracing::instrument(skip(self), fields(db.table = "memberships", db.operation = "select"))]
    pub async fn is_member(&self, user_id: Uuid, workspace_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM memberships WHERE user_id = $1 AND workspace_id = $2)",
        )
        .bind(user_id)
        .bind(workspace_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
