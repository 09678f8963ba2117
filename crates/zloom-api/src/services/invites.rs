//! Invite sending and acceptance

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;
use zloom_core::models::{CreateInviteRequest, Invite, Membership, User};
use zloom_core::{AccessError, AppError, Identity};
use zloom_db::{AcceptOutcome, InviteRepository, InviteStore, UserRepository, WorkspaceRepository};

use super::access::AccessVerifier;
use super::email::EmailService;
use super::users::resolve_user;

/// Consumes invites: the designated receiver's acceptance marks the invite
/// accepted and creates their membership in a single transaction.
#[derive(Clone)]
pub struct InviteAcceptor {
    store: Arc<dyn InviteStore>,
}

impl InviteAcceptor {
    pub fn new(store: Arc<dyn InviteStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip_all, fields(invite_id = %invite_id))]
    pub async fn accept_invite(
        &self,
        identity: Option<&Identity>,
        invite_id: Uuid,
    ) -> Result<Membership, AccessError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;

        // A missing invite is reported like a missing identity so invite ids
        // cannot be enumerated.
        let invite = self
            .store
            .find_invite(invite_id)
            .await
            .map_err(AccessError::unavailable)?
            .ok_or(AccessError::Unauthenticated)?;

        if invite.receiver_subject != identity.subject() {
            tracing::warn!(
                identity = %identity,
                workspace_id = %invite.workspace_id,
                "Invite acceptance by non-receiver denied"
            );
            return Err(AccessError::Unauthorized);
        }

        if invite.accepted {
            return Err(AccessError::AlreadyAccepted);
        }

        match self.store.accept_invite(invite_id).await {
            Ok(AcceptOutcome::Accepted(membership)) => {
                tracing::info!(
                    identity = %identity,
                    workspace_id = %membership.workspace_id,
                    membership_id = %membership.id,
                    "Invite accepted"
                );
                Ok(membership)
            }
            Ok(AcceptOutcome::AlreadyAccepted) => Err(AccessError::AlreadyAccepted),
            Err(e) => {
                tracing::error!(identity = %identity, error = %e, "Invite acceptance transaction failed");
                Err(AccessError::failed(e))
            }
        }
    }
}

/// Creates invites for workspace collaborators and emails the accept link
#[derive(Clone)]
pub struct InviteSender {
    access: AccessVerifier,
    users: UserRepository,
    workspaces: WorkspaceRepository,
    invites: InviteRepository,
    mailer: Option<EmailService>,
    frontend_url: String,
}

impl InviteSender {
    pub fn new(
        access: AccessVerifier,
        users: UserRepository,
        workspaces: WorkspaceRepository,
        invites: InviteRepository,
        mailer: Option<EmailService>,
        frontend_url: String,
    ) -> Self {
        Self {
            access,
            users,
            workspaces,
            invites,
            mailer,
            frontend_url,
        }
    }

    #[tracing::instrument(skip_all, fields(workspace_id = %workspace_id, receiver_id = %request.receiver_id))]
    pub async fn invite_member(
        &self,
        identity: Option<&Identity>,
        workspace_id: Uuid,
        request: CreateInviteRequest,
    ) -> Result<Invite, AppError> {
        let identity = identity.ok_or(AccessError::Unauthenticated)?;
        request.validate()?;
        let workspace = self
            .access
            .verify_access(Some(identity), workspace_id)
            .await?;
        let sender = resolve_user(&self.users, Some(identity)).await?;

        let receiver = self
            .users
            .find_by_id(request.receiver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recipient not found!".to_string()))?;

        if receiver.id == sender.id {
            return Err(AppError::InvalidInput(
                "You cannot invite yourself".to_string(),
            ));
        }
        if workspace.owner_id == receiver.id
            || self.workspaces.is_member(receiver.id, workspace.id).await?
        {
            return Err(AppError::Conflict(
                "User is already a member of this workspace".to_string(),
            ));
        }
        if self.invites.has_pending(receiver.id, workspace.id).await? {
            return Err(AppError::Conflict(
                "An invite is already pending for this user".to_string(),
            ));
        }

        let invite = self
            .invites
            .create_with_notification(
                sender.id,
                receiver.id,
                workspace.id,
                Invite::content_for(&workspace.name),
                sender_notification(&sender, &receiver, &workspace.name),
            )
            .await?;

        tracing::info!(invite_id = %invite.id, "Invite created");

        if let Some(mailer) = &self.mailer {
            let accept_url = format!("{}/invite/{}", self.frontend_url, invite.id);
            if let Err(e) = mailer
                .send_invitation(&request.email, receiver.first_name.as_deref(), &accept_url)
                .await
            {
                tracing::warn!(invite_id = %invite.id, error = %e, "Failed to send invitation email");
            }
        } else {
            tracing::debug!(invite_id = %invite.id, "SMTP not configured, invitation email skipped");
        }

        Ok(invite)
    }
}

fn display_name(user: &User) -> String {
    let name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        user.email.clone()
    } else {
        name
    }
}

fn sender_notification(sender: &User, receiver: &User, workspace_name: &str) -> String {
    format!(
        "{} invited {} into {}",
        display_name(sender),
        display_name(receiver),
        workspace_name
    )
}
