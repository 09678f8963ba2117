use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::subscription::SubscriptionPlan;
use super::user::UserSummary;

/// Video entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workspace_id: Uuid,
    pub folder_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub source: String,
    pub processing: bool,
    pub views: i32,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FolderRef {
    pub id: Uuid,
    pub name: String,
}

/// Flat row for the workspace video listing (video joined with folder and author)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoListRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source: String,
    pub processing: bool,
    pub folder_id: Option<Uuid>,
    pub folder_name: Option<String>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub author_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VideoListItem {
    pub id: Uuid,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source: String,
    pub processing: bool,
    pub folder: Option<FolderRef>,
    pub author: UserSummary,
}

impl From<VideoListRow> for VideoListItem {
    fn from(row: VideoListRow) -> Self {
        let folder = match (row.folder_id, row.folder_name) {
            (Some(id), Some(name)) => Some(FolderRef { id, name }),
            _ => None,
        };
        VideoListItem {
            id: row.id,
            title: row.title,
            created_at: row.created_at,
            source: row.source,
            processing: row.processing,
            folder,
            author: UserSummary {
                first_name: row.author_first_name,
                last_name: row.author_last_name,
                image: row.author_image,
            },
        }
    }
}

/// Flat row for the preview page (video joined with its author and plan)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoPreviewRow {
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source: String,
    pub description: Option<String>,
    pub processing: bool,
    pub views: i32,
    pub summary: Option<String>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub author_image: Option<String>,
    pub author_subject: String,
    pub author_trial: bool,
    pub author_plan: Option<SubscriptionPlan>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VideoAuthor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
    pub trial: bool,
    pub plan: Option<SubscriptionPlan>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VideoPreview {
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source: String,
    pub description: Option<String>,
    pub processing: bool,
    pub views: i32,
    pub summary: Option<String>,
    pub user: VideoAuthor,
    /// True when the caller recorded this video
    pub author: bool,
}

impl VideoPreviewRow {
    pub fn into_preview(self, caller_subject: &str) -> VideoPreview {
        let author = self.author_subject == caller_subject;
        VideoPreview {
            title: self.title,
            created_at: self.created_at,
            source: self.source,
            description: self.description,
            processing: self.processing,
            views: self.views,
            summary: self.summary,
            user: VideoAuthor {
                first_name: self.author_first_name,
                last_name: self.author_last_name,
                image: self.author_image,
                trial: self.author_trial,
                plan: self.author_plan,
            },
            author,
        }
    }
}

/// Request DTO for moving a video to another workspace and/or folder
#[derive(Debug, Deserialize, ToSchema)]
pub struct MoveVideoRequest {
    pub workspace_id: Uuid,
    #[serde(default)]
    pub folder_id: Option<Uuid>,
}

/// A video that just received its first view from someone other than its
/// author, with the author to tell about it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FirstView {
    pub video_id: Uuid,
    pub title: Option<String>,
    pub author_id: Uuid,
    pub author_email: String,
}

impl FirstView {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled Video")
    }

    /// Text of the author's notification and of the email body
    pub fn message(&self) -> String {
        format!("Your video {} just got its first viewer", self.display_title())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecordViewResponse {
    /// True when this view was the video's first and the author was told
    pub first_view: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview_row(subject: &str) -> VideoPreviewRow {
        VideoPreviewRow {
            title: Some("Standup".to_string()),
            created_at: Utc::now(),
            source: "standup.webm".to_string(),
            description: None,
            processing: false,
            views: 3,
            summary: None,
            author_first_name: Some("Ada".to_string()),
            author_last_name: None,
            author_image: None,
            author_subject: subject.to_string(),
            author_trial: false,
            author_plan: Some(SubscriptionPlan::Free),
        }
    }

    #[test]
    fn test_preview_marks_caller_as_author() {
        assert!(preview_row("user_a").into_preview("user_a").author);
        assert!(!preview_row("user_a").into_preview("user_b").author);
    }

    #[test]
    fn test_list_row_without_folder_has_no_folder_ref() {
        let row = VideoListRow {
            id: Uuid::new_v4(),
            title: None,
            created_at: Utc::now(),
            source: "a.webm".to_string(),
            processing: true,
            folder_id: None,
            folder_name: None,
            author_first_name: None,
            author_last_name: None,
            author_image: None,
        };
        let item = VideoListItem::from(row);
        assert!(item.folder.is_none());
        assert!(item.processing);
    }

    #[test]
    fn test_first_view_message_falls_back_to_default_title() {
        let mut event = FirstView {
            video_id: Uuid::new_v4(),
            title: Some("Standup".to_string()),
            author_id: Uuid::new_v4(),
            author_email: "ada@zloom.dev".to_string(),
        };
        assert_eq!(event.message(), "Your video Standup just got its first viewer");

        event.title = None;
        assert_eq!(
            event.message(),
            "Your video Untitled Video just got its first viewer"
        );
    }
}
