use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Subscription plan type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "subscription_plan", rename_all = "UPPERCASE")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionPlan {
    Free,
    Pro,
}

impl SubscriptionPlan {
    /// Only PRO subscribers may create additional (shared) workspaces.
    pub fn can_create_workspaces(self) -> bool {
        matches!(self, SubscriptionPlan::Pro)
    }
}
