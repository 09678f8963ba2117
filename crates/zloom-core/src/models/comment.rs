use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::user::UserSummary;

/// Comment row joined with its author
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CommentRow {
    pub id: Uuid,
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
    pub user: UserSummary,
}

/// A top-level comment with its replies
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub replies: Vec<CommentResponse>,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        CommentResponse {
            id: row.id,
            user_id: row.user_id,
            comment_text: row.comment_text,
            created_at: row.created_at,
            user: UserSummary {
                first_name: row.first_name,
                last_name: row.last_name,
                image: row.image,
            },
        }
    }
}

/// Group rows (ordered by creation time) into top-level threads.
/// Replies whose parent is missing from `rows` are dropped.
pub fn build_comment_threads(rows: Vec<CommentRow>) -> Vec<CommentThread> {
    let (top_level, replies): (Vec<_>, Vec<_>) =
        rows.into_iter().partition(|row| row.parent_id.is_none());

    let mut threads: Vec<CommentThread> = top_level
        .into_iter()
        .map(|row| CommentThread {
            comment: row.into(),
            replies: Vec::new(),
        })
        .collect();

    for reply in replies {
        if let Some(thread) = threads
            .iter_mut()
            .find(|t| Some(t.comment.id) == reply.parent_id)
        {
            thread.replies.push(reply.into());
        }
    }

    threads
}

/// Request DTO for posting a comment or a reply
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PostCommentRequest {
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Comment must be between 1 and 2000 characters"
    ))]
    pub comment_text: String,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}
