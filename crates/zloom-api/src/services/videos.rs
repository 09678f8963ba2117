//! Video listing, relocation, share-link preview and view counting

use uuid::Uuid;
use zloom_core::models::{MoveVideoRequest, RecordViewResponse, Video, VideoListItem, VideoPreview};
use zloom_core::{AccessError, AppError, Identity};
use zloom_db::{FolderRepository, VideoRepository};

use super::access::AccessVerifier;
use super::email::EmailService;

#[derive(Clone)]
pub struct VideoService {
    access: AccessVerifier,
    folders: FolderRepository,
    videos: VideoRepository,
    mailer: Option<EmailService>,
}

impl VideoService {
    pub fn new(
        access: AccessVerifier,
        folders: FolderRepository,
        videos: VideoRepository,
        mailer: Option<EmailService>,
    ) -> Self {
        Self {
            access,
            folders,
            videos,
            mailer,
        }
    }

    /// Videos directly in a workspace or in a folder, oldest first.
    ///
    /// `scope_id` may name either. A folder scope is guarded on the folder's
    /// workspace.
    #[tracing::instrument(skip_all, fields(scope_id = %scope_id))]
    pub async fn list(
        &self,
        identity: Option<&Identity>,
        scope_id: Uuid,
    ) -> Result<Vec<VideoListItem>, AppError> {
        if identity.is_none() {
            return Err(AccessError::Unauthenticated.into());
        }

        let workspace_id = match self.folders.find(scope_id).await? {
            Some(folder) => folder.workspace_id,
            None => scope_id,
        };
        self.access.verify_access(identity, workspace_id).await?;

        let rows = self.videos.list_in_scope(scope_id).await?;
        Ok(rows.into_iter().map(VideoListItem::from).collect())
    }

    /// Move a video into another workspace (and optionally a folder of it).
    /// The caller needs access to both the current and the target workspace.
    #[tracing::instrument(skip_all, fields(video_id = %video_id, workspace_id = %request.workspace_id))]
    pub async fn relocate(
        &self,
        identity: Option<&Identity>,
        video_id: Uuid,
        request: MoveVideoRequest,
    ) -> Result<Video, AppError> {
        if identity.is_none() {
            return Err(AccessError::Unauthenticated.into());
        }

        let video = self.videos.find(video_id).await?.ok_or_else(video_not_found)?;
        self.access.verify_access(identity, video.workspace_id).await?;
        if request.workspace_id != video.workspace_id {
            self.access
                .verify_access(identity, request.workspace_id)
                .await?;
        }

        if let Some(folder_id) = request.folder_id {
            let folder = self
                .folders
                .find(folder_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Folder not found".to_string()))?;
            if folder.workspace_id != request.workspace_id {
                return Err(AppError::InvalidInput(
                    "Folder does not belong to the target workspace".to_string(),
                ));
            }
        }

        let moved = self
            .videos
            .relocate(video_id, request.workspace_id, request.folder_id)
            .await?
            .ok_or_else(video_not_found)?;
        tracing::info!(folder_id = ?moved.folder_id, "Video relocated");
        Ok(moved)
    }

    /// Preview for a share link. Any signed-in caller may view it.
    pub async fn preview(
        &self,
        identity: Option<&Identity>,
        video_id: Uuid,
    ) -> Result<VideoPreview, AppError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;
        let row = self
            .videos
            .preview(video_id)
            .await?
            .ok_or_else(video_not_found)?;
        Ok(row.into_preview(identity.subject()))
    }

    /// Count a signed-in view of a shared video.
    ///
    /// The first view by someone other than the author notifies the author
    /// in-app and by email when they have first-view alerts on. Later views,
    /// the author's own views and views of videos whose author opted out
    /// change nothing.
    #[tracing::instrument(skip_all, fields(video_id = %video_id))]
    pub async fn record_view(
        &self,
        identity: Option<&Identity>,
        video_id: Uuid,
    ) -> Result<RecordViewResponse, AppError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;

        let Some(first_view) = self
            .videos
            .record_first_view(video_id, identity.subject())
            .await?
        else {
            self.videos.find(video_id).await?.ok_or_else(video_not_found)?;
            return Ok(RecordViewResponse { first_view: false });
        };

        tracing::info!(author_id = %first_view.author_id, "Video got its first viewer");

        match &self.mailer {
            Some(mailer) => {
                if let Err(e) = mailer.send_first_view(&first_view).await {
                    tracing::warn!(error = %e, "Failed to send first view email");
                }
            }
            None => tracing::debug!("SMTP not configured, first view email skipped"),
        }

        Ok(RecordViewResponse { first_view: true })
    }
}

fn video_not_found() -> AppError {
    AppError::NotFound("Video not found".to_string())
}
