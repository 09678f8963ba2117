use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use zloom_core::models::{FirstView, Video, VideoListRow, VideoPreviewRow};
use zloom_core::AppError;

use super::transaction::with_transaction;

const VIDEO_COLUMNS: &str = "id, user_id, workspace_id, folder_id, title, description, source, \
                             processing, views, summary, created_at";

/// Repository for recorded videos
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Videos whose workspace or folder is `scope_id`, oldest first
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    pub async fn list_in_scope(&self, scope_id: Uuid) -> Result<Vec<VideoListRow>, AppError> {
        let videos = sqlx::query_as::<Postgres, VideoListRow>(
            r#"
            SELECT v.id, v.title, v.created_at, v.source, v.processing,
                   f.id AS folder_id, f.name AS folder_name,
                   u.first_name AS author_first_name,
                   u.last_name AS author_last_name,
                   u.image AS author_image
            FROM videos v
            JOIN users u ON u.id = v.user_id
            LEFT JOIN folders f ON f.id = v.folder_id
            WHERE v.workspace_id = $1 OR v.folder_id = $1
            ORDER BY v.created_at ASC
            "#,
        )
        .bind(scope_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    pub async fn find(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            "SELECT {} FROM videos WHERE id = $1",
            VIDEO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    /// Move a video to a workspace, optionally into one of its folders.
    /// `folder_id = None` leaves the video at the workspace root.
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    pub async fn relocate(
        &self,
        id: Uuid,
        workspace_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            "UPDATE videos SET workspace_id = $2, folder_id = $3 WHERE id = $1 RETURNING {}",
            VIDEO_COLUMNS
        ))
        .bind(id)
        .bind(workspace_id)
        .bind(folder_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    pub async fn preview(&self, id: Uuid) -> Result<Option<VideoPreviewRow>, AppError> {
        let preview = sqlx::query_as::<Postgres, VideoPreviewRow>(
            r#"
            SELECT v.title, v.created_at, v.source, v.description, v.processing,
                   v.views, v.summary,
                   u.first_name AS author_first_name,
                   u.last_name AS author_last_name,
                   u.image AS author_image,
                   u.auth_subject AS author_subject,
                   u.trial AS author_trial,
                   s.plan AS author_plan
            FROM videos v
            JOIN users u ON u.id = v.user_id
            LEFT JOIN subscriptions s ON s.user_id = u.id
            WHERE v.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(preview)
    }

    /// Count a view from `viewer_subject` when it is the video's first and
    /// notify the author.
    ///
    /// Only matches while `views = 0`, the viewer is not the author and the
    /// author has first-view alerts enabled. The counter update and the
    /// author's notification commit together. Concurrent first viewers
    /// serialize on the row lock and only one of them gets `Some`.
    #[tracing::instrument(skip(self, viewer_subject), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    pub async fn record_first_view(
        &self,
        id: Uuid,
        viewer_subject: &str,
    ) -> Result<Option<FirstView>, AppError> {
        let viewer_subject = viewer_subject.to_string();
        with_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                let first_view = sqlx::query_as::<Postgres, FirstView>(
                    r#"
                    UPDATE videos v SET views = v.views + 1
                    FROM users u
                    WHERE v.id = $1
                      AND v.views = 0
                      AND u.id = v.user_id
                      AND u.first_view = TRUE
                      AND u.auth_subject <> $2
                    RETURNING v.id AS video_id, v.title,
                              u.id AS author_id, u.email AS author_email
                    "#,
                )
                .bind(id)
                .bind(&viewer_subject)
                .fetch_optional(&mut **tx)
                .await?;

                let Some(first_view) = first_view else {
                    return Ok(None);
                };

                sqlx::query("INSERT INTO notifications (user_id, content) VALUES ($1, $2)")
                    .bind(first_view.author_id)
                    .bind(first_view.message())
                    .execute(&mut **tx)
                    .await?;

                Ok(Some(first_view))
            })
        })
        .await
    }
}
