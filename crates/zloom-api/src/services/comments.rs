//! Comment threads on videos

use uuid::Uuid;
use validator::Validate;
use zloom_core::models::{build_comment_threads, CommentResponse, CommentThread, PostCommentRequest};
use zloom_core::{AccessError, AppError, Identity};
use zloom_db::{CommentRepository, UserRepository, VideoRepository};

use super::users::resolve_user;

#[derive(Clone)]
pub struct CommentService {
    users: UserRepository,
    videos: VideoRepository,
    comments: CommentRepository,
}

impl CommentService {
    pub fn new(users: UserRepository, videos: VideoRepository, comments: CommentRepository) -> Self {
        Self {
            users,
            videos,
            comments,
        }
    }

    pub async fn list(
        &self,
        identity: Option<&Identity>,
        video_id: Uuid,
    ) -> Result<Vec<CommentThread>, AppError> {
        if identity.is_none() {
            return Err(AccessError::Unauthenticated.into());
        }
        let rows = self.comments.list_for_video(video_id).await?;
        Ok(build_comment_threads(rows))
    }

    /// Post a comment or a reply. Threads are one level deep: a reply to a
    /// reply is attached to the top-level comment.
    #[tracing::instrument(skip_all, fields(video_id = %video_id))]
    pub async fn post(
        &self,
        identity: Option<&Identity>,
        video_id: Uuid,
        request: PostCommentRequest,
    ) -> Result<CommentResponse, AppError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;
        let request = PostCommentRequest {
            comment_text: request.comment_text.trim().to_string(),
            parent_id: request.parent_id,
        };
        request.validate()?;
        let user = resolve_user(&self.users, Some(identity)).await?;

        if self.videos.find(video_id).await?.is_none() {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        let parent_id = match request.parent_id {
            Some(parent_id) => Some(self.thread_root(video_id, parent_id).await?),
            None => None,
        };

        let row = self
            .comments
            .create(video_id, user.id, parent_id, &request.comment_text)
            .await?;
        tracing::debug!(comment_id = %row.id, parent_id = ?parent_id, "Comment posted");
        Ok(CommentResponse::from(row))
    }

    async fn thread_root(&self, video_id: Uuid, parent_id: Uuid) -> Result<Uuid, AppError> {
        let (parent_video, grandparent) = self
            .comments
            .find_thread_ref(parent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Parent comment not found".to_string()))?;
        if parent_video != video_id {
            return Err(AppError::InvalidInput(
                "Parent comment belongs to another video".to_string(),
            ));
        }
        Ok(grandparent.unwrap_or(parent_id))
    }
}
