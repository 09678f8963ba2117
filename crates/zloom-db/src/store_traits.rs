//! Store trait abstractions for the access and invite flows
//!
//! These traits define the minimal datastore interface the access verifier and
//! the invite acceptor need, so both flows can run against Postgres or an
//! in-memory store.

use async_trait::async_trait;
use uuid::Uuid;
use zloom_core::models::{InviteRecord, Membership, Workspace};
use zloom_core::AppError;

use crate::db::{InviteRepository, WorkspaceRepository};

/// Result of an acceptance attempt that reached the datastore
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// The invite flipped to accepted and this membership was created
    Accepted(Membership),
    /// The invite was no longer pending; nothing was written
    AlreadyAccepted,
}

#[async_trait]
pub trait WorkspaceAccessStore: Send + Sync {
    /// The workspace with this id, if `subject` owns it or is a member of it
    async fn find_accessible_workspace(
        &self,
        subject: &str,
        workspace_id: Uuid,
    ) -> Result<Option<Workspace>, AppError>;
}

#[async_trait]
pub trait InviteStore: Send + Sync {
    /// Get an invite with its receiver's identity subject
    async fn find_invite(&self, invite_id: Uuid) -> Result<Option<InviteRecord>, AppError>;

    /// Atomically mark the invite accepted and create the receiver's membership.
    /// An error means neither change was persisted.
    async fn accept_invite(&self, invite_id: Uuid) -> Result<AcceptOutcome, AppError>;
}

// Implementations for concrete repository types

#[async_trait]
impl WorkspaceAccessStore for WorkspaceRepository {
    async fn find_accessible_workspace(
        &self,
        subject: &str,
        workspace_id: Uuid,
    ) -> Result<Option<Workspace>, AppError> {
        self.find_accessible(subject, workspace_id).await
    }
}

#[async_trait]
impl InviteStore for InviteRepository {
    async fn find_invite(&self, invite_id: Uuid) -> Result<Option<InviteRecord>, AppError> {
        self.find_record(invite_id).await
    }

    async fn accept_invite(&self, invite_id: Uuid) -> Result<AcceptOutcome, AppError> {
        self.accept(invite_id).await
    }
}
