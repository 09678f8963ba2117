use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use zloom_core::models::Notification;
use zloom_core::AppError;

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Notifications addressed to a user, newest first, with the total count
    #[tracing::instrument(skip(self), fields(db.table = "notifications", db.operation = "select"))]
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<(Vec<Notification>, i64), AppError> {
        let notifications = sqlx::query_as::<Postgres, Notification>(
            r#"
            SELECT id, user_id, content, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let count = sqlx::query_scalar::<Postgres, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((notifications, count))
    }
}
