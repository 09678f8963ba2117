use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use zloom_core::models::{Invite, InviteRecord, Membership};
use zloom_core::AppError;

use super::transaction::with_transaction;
use crate::store_traits::AcceptOutcome;

/// Partial unique index allowing one pending invite per receiver and workspace
const PENDING_INVITE_KEY: &str = "invites_pending_receiver_workspace_key";

/// Repository for workspace invites
#[derive(Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load an invite with the identity subject of its receiver.
    #[tracing::instrument(skip(self), fields(db.table = "invites", db.operation = "select", db.record_id = %invite_id))]
    pub async fn find_record(&self, invite_id: Uuid) -> Result<Option<InviteRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, InviteRecord>(
            r#"
            SELECT i.id, i.workspace_id, i.receiver_id,
                   u.auth_subject AS receiver_subject, i.accepted
            FROM invites i
            JOIN users u ON u.id = i.receiver_id
            WHERE i.id = $1
            "#,
        )
        .bind(invite_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "invites", db.operation = "select"))]
    pub async fn has_pending(&self, receiver_id: Uuid, workspace_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM invites
                WHERE receiver_id = $1 AND workspace_id = $2 AND accepted = FALSE
            )
            "#,
        )
        .bind(receiver_id)
        .bind(workspace_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Create an invite and record a notification for its sender in one transaction.
    ///
    /// A second pending invite for the same receiver and workspace is rejected
    /// by the database and reported as `AppError::Conflict`, so two racing
    /// senders cannot both pass the pending check.
    #[tracing::instrument(skip(self, content, notification), fields(db.table = "invites", db.operation = "insert"))]
    pub async fn create_with_notification(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        workspace_id: Uuid,
        content: String,
        notification: String,
    ) -> Result<Invite, AppError> {
        with_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                let invite = sqlx::query_as::<Postgres, Invite>(
                    r#"
                    INSERT INTO invites (sender_id, receiver_id, workspace_id, content)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, sender_id, receiver_id, workspace_id, content, accepted, created_at
                    "#,
                )
                .bind(sender_id)
                .bind(receiver_id)
                .bind(workspace_id)
                .bind(&content)
                .fetch_one(&mut **tx)
                .await?;

                sqlx::query("INSERT INTO notifications (user_id, content) VALUES ($1, $2)")
                    .bind(sender_id)
                    .bind(&notification)
                    .execute(&mut **tx)
                    .await?;

                Ok(invite)
            })
        })
        .await
        .map_err(|e| match e {
            AppError::Database(sqlx::Error::Database(db))
                if db.constraint() == Some(PENDING_INVITE_KEY) =>
            {
                AppError::Conflict("An invite is already pending for this user".to_string())
            }
            other => other,
        })
    }

    /// Mark a pending invite accepted and create the receiver's membership.
    ///
    /// Both statements run in one transaction. The flag update only matches a
    /// pending row, so a concurrent acceptance blocks on the row lock and then
    /// observes `accepted = true`, yielding `AcceptOutcome::AlreadyAccepted`.
    /// A failed membership insert rolls the flag back.
    #[tracing::instrument(skip(self), fields(db.table = "invites", db.operation = "update", db.record_id = %invite_id))]
    pub async fn accept(&self, invite_id: Uuid) -> Result<AcceptOutcome, AppError> {
        with_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                let claimed = sqlx::query_as::<Postgres, (Uuid, Uuid)>(
                    r#"
                    UPDATE invites SET accepted = TRUE
                    WHERE id = $1 AND accepted = FALSE
                    RETURNING receiver_id, workspace_id
                    "#,
                )
                .bind(invite_id)
                .fetch_optional(&mut **tx)
                .await?;

                let Some((receiver_id, workspace_id)) = claimed else {
                    return Ok(AcceptOutcome::AlreadyAccepted);
                };

                let membership = sqlx::query_as::<Postgres, Membership>(
                    r#"
                    INSERT INTO memberships (user_id, workspace_id)
                    VALUES ($1, $2)
                    RETURNING id, user_id, workspace_id, created_at
                    "#,
                )
                .bind(receiver_id)
                .bind(workspace_id)
                .fetch_one(&mut **tx)
                .await?;

                Ok(AcceptOutcome::Accepted(membership))
            })
        })
        .await
    }
}
