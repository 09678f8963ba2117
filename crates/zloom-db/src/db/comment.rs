use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use zloom_core::models::CommentRow;
use zloom_core::AppError;

/// Repository for video comments and replies
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All comments of a video with their authors, oldest first
    #[tracing::instrument(skip(self), fields(db.table = "comments", db.operation = "select"))]
    pub async fn list_for_video(&self, video_id: Uuid) -> Result<Vec<CommentRow>, AppError> {
        let rows = sqlx::query_as::<Postgres, CommentRow>(
            r#"
            SELECT c.id, c.video_id, c.user_id, c.parent_id, c.comment_text, c.created_at,
                   u.first_name, u.last_name, u.image
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.video_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(video_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// The video and parent of a comment, used to resolve reply targets
    #[tracing::instrument(skip(self), fields(db.table = "comments", db.operation = "select", db.record_id = %id))]
    pub async fn find_thread_ref(&self, id: Uuid) -> Result<Option<(Uuid, Option<Uuid>)>, AppError> {
        let thread_ref = sqlx::query_as::<Postgres, (Uuid, Option<Uuid>)>(
            "SELECT video_id, parent_id FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(thread_ref)
    }

    #[tracing::instrument(skip(self, comment_text), fields(db.table = "comments", db.operation = "insert"))]
    pub async fn create(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        comment_text: &str,
    ) -> Result<CommentRow, AppError> {
        let row = sqlx::query_as::<Postgres, CommentRow>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (video_id, user_id, parent_id, comment_text)
                VALUES ($1, $2, $3, $4)
                RETURNING id, video_id, user_id, parent_id, comment_text, created_at
            )
            SELECT i.id, i.video_id, i.user_id, i.parent_id, i.comment_text, i.created_at,
                   u.first_name, u.last_name, u.image
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(video_id)
        .bind(user_id)
        .bind(parent_id)
        .bind(comment_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
