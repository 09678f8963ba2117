//! User provisioning and per-user settings

use zloom_core::models::{
    AuthenticatedUser, FirstViewResponse, NotificationsResponse, User, UserProfile,
    UserSearchResult,
};
use zloom_core::{AccessError, AppError, Identity, IdentityProfile};
use zloom_db::{NotificationRepository, UserRepository, WorkspaceRepository};

/// Load the local user behind an identity.
pub async fn resolve_user(
    users: &UserRepository,
    identity: Option<&Identity>,
) -> Result<User, AppError> {
    let identity = identity.ok_or(AccessError::Unauthenticated)?;
    users
        .find_by_subject(identity.subject())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

fn is_unique_violation(err: &AppError) -> bool {
    matches!(err, AppError::Database(sqlx::Error::Database(db)) if db.is_unique_violation())
}

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    workspaces: WorkspaceRepository,
    notifications: NotificationRepository,
}

impl UserService {
    pub fn new(
        users: UserRepository,
        workspaces: WorkspaceRepository,
        notifications: NotificationRepository,
    ) -> Self {
        Self {
            users,
            workspaces,
            notifications,
        }
    }

    /// Return the caller's user, provisioning it on first sign-in.
    #[tracing::instrument(skip_all)]
    pub async fn authenticate(
        &self,
        identity: Option<&Identity>,
        profile: &IdentityProfile,
    ) -> Result<AuthenticatedUser, AppError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;

        if let Some(user) = self.users.find_by_subject(identity.subject()).await? {
            return self.existing(user).await;
        }

        let email = profile
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                AppError::InvalidInput("Identity token carries no email claim".to_string())
            })?;

        match self.users.provision(identity.subject(), email, profile).await {
            Ok((user, workspace)) => {
                tracing::info!(
                    identity = %identity,
                    user_id = %user.id,
                    workspace_id = %workspace.id,
                    "User provisioned"
                );
                Ok(AuthenticatedUser {
                    user,
                    workspaces: vec![workspace],
                    created: true,
                })
            }
            // A concurrent first sign-in won the insert.
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(identity = %identity, "Provisioning raced, loading existing user");
                let user = self
                    .users
                    .find_by_subject(identity.subject())
                    .await?
                    .ok_or(e)?;
                self.existing(user).await
            }
            Err(e) => Err(e),
        }
    }

    async fn existing(&self, user: User) -> Result<AuthenticatedUser, AppError> {
        let workspaces = self.workspaces.list_owned(user.id).await?;
        Ok(AuthenticatedUser {
            user,
            workspaces,
            created: false,
        })
    }

    pub async fn profile(&self, identity: Option<&Identity>) -> Result<UserProfile, AppError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;
        self.users
            .get_profile(identity.subject())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn search(
        &self,
        identity: Option<&Identity>,
        query: &str,
    ) -> Result<Vec<UserSearchResult>, AppError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.users.search(identity.subject(), query).await
    }

    pub async fn notifications(
        &self,
        identity: Option<&Identity>,
    ) -> Result<NotificationsResponse, AppError> {
        let user = resolve_user(&self.users, identity).await?;
        let (notifications, count) = self.notifications.list_for_user(user.id).await?;
        Ok(NotificationsResponse {
            notifications,
            count,
        })
    }

    pub async fn first_view(&self, identity: Option<&Identity>) -> Result<bool, AppError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;
        self.users
            .get_first_view(identity.subject())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn set_first_view(
        &self,
        identity: Option<&Identity>,
        enabled: bool,
    ) -> Result<FirstViewResponse, AppError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;
        let enabled = self
            .users
            .set_first_view(identity.subject(), enabled)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(FirstViewResponse {
            enabled,
            message: "Setting updated".to_string(),
        })
    }
}
