//! In-memory implementation of the workspace access and invite stores

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;
use zloom_core::models::{InviteRecord, Membership, Workspace, WorkspaceType};
use zloom_core::AppError;

use crate::store_traits::{AcceptOutcome, InviteStore, WorkspaceAccessStore};

#[derive(Debug, Clone)]
struct StoredInvite {
    workspace_id: Uuid,
    receiver_id: Uuid,
    accepted: bool,
}

#[derive(Default)]
struct State {
    /// user id -> identity subject
    users: HashMap<Uuid, String>,
    workspaces: HashMap<Uuid, Workspace>,
    memberships: Vec<Membership>,
    invites: HashMap<Uuid, StoredInvite>,
    fail_lookups: bool,
    fail_membership_inserts: bool,
}

/// Store that keeps users, workspaces, memberships and invites in memory.
///
/// Cloning shares the underlying state, so a test can keep a handle for
/// assertions after passing a clone to the code under test.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a user linked to `subject` and return its id
    pub fn add_user(&self, subject: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state().users.insert(id, subject.to_string());
        id
    }

    pub fn add_workspace(&self, owner_id: Uuid, name: &str) -> Workspace {
        let workspace = Workspace {
            id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            workspace_type: WorkspaceType::Public,
            created_at: Utc::now(),
        };
        self.state()
            .workspaces
            .insert(workspace.id, workspace.clone());
        workspace
    }

    pub fn add_membership(&self, user_id: Uuid, workspace_id: Uuid) -> Membership {
        let membership = Membership {
            id: Uuid::new_v4(),
            user_id,
            workspace_id,
            created_at: Utc::now(),
        };
        self.state().memberships.push(membership.clone());
        membership
    }

    /// Create a pending invite and return its id
    pub fn add_invite(&self, receiver_id: Uuid, workspace_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.state().invites.insert(
            id,
            StoredInvite {
                workspace_id,
                receiver_id,
                accepted: false,
            },
        );
        id
    }

    pub fn invite_accepted(&self, invite_id: Uuid) -> Option<bool> {
        self.state().invites.get(&invite_id).map(|i| i.accepted)
    }

    pub fn memberships_of(&self, workspace_id: Uuid) -> Vec<Membership> {
        self.state()
            .memberships
            .iter()
            .filter(|m| m.workspace_id == workspace_id)
            .cloned()
            .collect()
    }

    /// Make every lookup fail as if the datastore were unreachable
    pub fn fail_lookups(&self) {
        self.state().fail_lookups = true;
    }

    /// Make the membership-creation step of an acceptance fail
    pub fn fail_membership_inserts(&self) {
        self.state().fail_membership_inserts = true;
    }
}

fn unreachable_store() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl WorkspaceAccessStore for MemoryStore {
    async fn find_accessible_workspace(
        &self,
        subject: &str,
        workspace_id: Uuid,
    ) -> Result<Option<Workspace>, AppError> {
        let state = self.state();
        if state.fail_lookups {
            return Err(unreachable_store());
        }

        let Some(workspace) = state.workspaces.get(&workspace_id) else {
            return Ok(None);
        };

        let has_subject = |user_id: &Uuid| {
            state
                .users
                .get(user_id)
                .is_some_and(|stored| stored == subject)
        };

        let is_owner = has_subject(&workspace.owner_id);
        let is_member = state
            .memberships
            .iter()
            .any(|m| m.workspace_id == workspace_id && has_subject(&m.user_id));

        Ok((is_owner || is_member).then(|| workspace.clone()))
    }
}

#[async_trait]
impl InviteStore for MemoryStore {
    async fn find_invite(&self, invite_id: Uuid) -> Result<Option<InviteRecord>, AppError> {
        let state = self.state();
        if state.fail_lookups {
            return Err(unreachable_store());
        }

        Ok(state.invites.get(&invite_id).and_then(|invite| {
            let receiver_subject = state.users.get(&invite.receiver_id)?.clone();
            Some(InviteRecord {
                id: invite_id,
                workspace_id: invite.workspace_id,
                receiver_id: invite.receiver_id,
                receiver_subject,
                accepted: invite.accepted,
            })
        }))
    }

    async fn accept_invite(&self, invite_id: Uuid) -> Result<AcceptOutcome, AppError> {
        // One lock guard for the whole acceptance mirrors the row lock in Postgres.
        let mut state = self.state();

        let invite = match state.invites.get(&invite_id) {
            Some(invite) if !invite.accepted => invite.clone(),
            _ => return Ok(AcceptOutcome::AlreadyAccepted),
        };

        let duplicate = state
            .memberships
            .iter()
            .any(|m| m.user_id == invite.receiver_id && m.workspace_id == invite.workspace_id);
        if state.fail_membership_inserts || duplicate {
            return Err(AppError::Database(sqlx::Error::Protocol(
                "membership insert rejected".to_string(),
            )));
        }

        let membership = Membership {
            id: Uuid::new_v4(),
            user_id: invite.receiver_id,
            workspace_id: invite.workspace_id,
            created_at: Utc::now(),
        };
        state.memberships.push(membership.clone());
        if let Some(stored) = state.invites.get_mut(&invite_id) {
            stored.accepted = true;
        }

        Ok(AcceptOutcome::Accepted(membership))
    }
}
