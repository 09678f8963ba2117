use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::subscription::SubscriptionPlan;
use super::workspace::Workspace;

/// Local user profile, linked to exactly one external identity via `auth_subject`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub auth_subject: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
    /// Notify the user when one of their recordings gets its first viewer
    pub first_view: bool,
    pub trial: bool,
    pub created_at: DateTime<Utc>,
}

/// Author/commenter information embedded in other responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
}

/// Result of the sign-in callback: the user and the workspaces they own
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user: User,
    pub workspaces: Vec<Workspace>,
    /// True when this request provisioned the user
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UserProfile {
    pub id: Uuid,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UserSearchResult {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
    pub email: String,
    pub plan: Option<SubscriptionPlan>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FirstViewSetting {
    pub enabled: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FirstViewResponse {
    pub enabled: bool,
    pub message: String,
}
