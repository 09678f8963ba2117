use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Grants a non-owner user access to a workspace. Created only by invite acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Membership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workspace_id: Uuid,
    pub created_at: DateTime<Utc>,
}
