//! Authenticated principals as issued by the external identity provider.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An authenticated principal, identified by the opaque subject the identity
/// provider issued. Users are linked to identities through `users.auth_subject`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    subject: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.subject)
    }
}

/// Profile claims carried alongside the identity, used when provisioning a
/// local user on first sign-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityProfile {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
}

impl IdentityProfile {
    /// Name for the personal workspace created on first sign-in.
    pub fn personal_workspace_name(&self) -> String {
        match self.first_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("{}'s Workspace", name),
            _ => "My Workspace".to_string(),
        }
    }
}
