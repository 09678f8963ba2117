use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use zloom_core::models::{
    SubscriptionPlan, User, UserProfile, UserSearchResult, Workspace, WorkspaceType,
};
use zloom_core::{AppError, IdentityProfile};

use super::transaction::with_transaction;

const USER_COLUMNS: &str =
    "id, auth_subject, email, first_name, last_name, image, first_view, trial, created_at";

/// Repository for users and their subscriptions
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(&format!(
            "SELECT {} FROM users WHERE auth_subject = $1",
            USER_COLUMNS
        ))
        .bind(subject)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = %id))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Create a user together with a FREE subscription and a PERSONAL workspace.
    ///
    /// The three rows are written in one transaction. A concurrent first sign-in
    /// for the same subject fails on the `auth_subject` unique constraint.
    #[tracing::instrument(skip(self, profile), fields(db.table = "users", db.operation = "insert"))]
    pub async fn provision(
        &self,
        subject: &str,
        email: &str,
        profile: &IdentityProfile,
    ) -> Result<(User, Workspace), AppError> {
        let subject = subject.to_string();
        let email = email.to_string();
        let first_name = profile.first_name.clone();
        let last_name = profile.last_name.clone();
        let image = profile.image.clone();
        let workspace_name = profile.personal_workspace_name();

        with_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                let user = sqlx::query_as::<Postgres, User>(&format!(
                    r#"
                    INSERT INTO users (auth_subject, email, first_name, last_name, image)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING {}
                    "#,
                    USER_COLUMNS
                ))
                .bind(&subject)
                .bind(&email)
                .bind(&first_name)
                .bind(&last_name)
                .bind(&image)
                .fetch_one(&mut **tx)
                .await?;

                sqlx::query("INSERT INTO subscriptions (user_id, plan) VALUES ($1, $2)")
                    .bind(user.id)
                    .bind(SubscriptionPlan::Free)
                    .execute(&mut **tx)
                    .await?;

                let workspace = sqlx::query_as::<Postgres, Workspace>(
                    r#"
                    INSERT INTO workspaces (owner_id, name, workspace_type)
                    VALUES ($1, $2, $3)
                    RETURNING id, owner_id, name, workspace_type, created_at
                    "#,
                )
                .bind(user.id)
                .bind(&workspace_name)
                .bind(WorkspaceType::Personal)
                .fetch_one(&mut **tx)
                .await?;

                Ok((user, workspace))
            })
        })
        .await
    }

    #[tracing::instrument(skip(self), fields(db.table = "subscriptions", db.operation = "select"))]
    pub async fn get_plan(&self, user_id: Uuid) -> Result<Option<SubscriptionPlan>, AppError> {
        let plan = sqlx::query_scalar::<Postgres, SubscriptionPlan>(
            "SELECT plan FROM subscriptions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(plan)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn get_profile(&self, subject: &str) -> Result<Option<UserProfile>, AppError> {
        let profile = sqlx::query_as::<Postgres, UserProfile>(
            "SELECT id, image FROM users WHERE auth_subject = $1",
        )
        .bind(subject)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Case-insensitive substring search over first name, last name and email,
    /// excluding the caller.
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn search(
        &self,
        caller_subject: &str,
        query: &str,
    ) -> Result<Vec<UserSearchResult>, AppError> {
        let pattern = format!("%{}%", escape_like(query));

        let users = sqlx::query_as::<Postgres, UserSearchResult>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.image, u.email, s.plan
            FROM users u
            LEFT JOIN subscriptions s ON s.user_id = u.id
            WHERE (u.first_name ILIKE $1 OR u.last_name ILIKE $1 OR u.email ILIKE $1)
              AND u.auth_subject <> $2
            ORDER BY u.first_name ASC NULLS LAST, u.email ASC
            LIMIT 50
            "#,
        )
        .bind(&pattern)
        .bind(caller_subject)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn get_first_view(&self, subject: &str) -> Result<Option<bool>, AppError> {
        let enabled = sqlx::query_scalar::<Postgres, bool>(
            "SELECT first_view FROM users WHERE auth_subject = $1",
        )
        .bind(subject)
        .fetch_optional(&self.pool)
        .await?;

        Ok(enabled)
    }

    /// Returns the stored value, or `None` when no user has this subject.
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "update"))]
    pub async fn set_first_view(
        &self,
        subject: &str,
        enabled: bool,
    ) -> Result<Option<bool>, AppError> {
        let stored = sqlx::query_scalar::<Postgres, bool>(
            "UPDATE users SET first_view = $2 WHERE auth_subject = $1 RETURNING first_view",
        )
        .bind(subject)
        .bind(enabled)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stored)
    }
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
