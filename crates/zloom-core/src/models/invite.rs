use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::membership::Membership;

/// Invite entity. `accepted` starts false and is set true exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Invite {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub workspace_id: Uuid,
    pub content: String,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
}

/// Invite joined with the identity subject of its receiver, as needed to
/// authorize an acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InviteRecord {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub receiver_id: Uuid,
    pub receiver_subject: String,
    pub accepted: bool,
}

/// Request DTO for inviting a user into a workspace
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateInviteRequest {
    pub receiver_id: Uuid,
    #[validate(email(message = "A valid receiver email is required"))]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InviteResponse {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub receiver_id: Uuid,
    pub accepted: bool,
    pub message: String,
}

impl Invite {
    pub fn to_response(&self, message: impl Into<String>) -> InviteResponse {
        InviteResponse {
            id: self.id,
            workspace_id: self.workspace_id,
            receiver_id: self.receiver_id,
            accepted: self.accepted,
            message: message.into(),
        }
    }

    /// Body stored on the invite and shown to the receiver.
    pub fn content_for(workspace_name: &str) -> String {
        format!(
            "You are invited to join {}, click accept to confirm",
            workspace_name
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AcceptInviteResponse {
    pub message: String,
    pub membership: Membership,
}
