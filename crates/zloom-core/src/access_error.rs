//! Outcome taxonomy for workspace-access checks and invite acceptance
//!
//! Every denial is a tagged variant instead of a numeric status so callers can
//! match on the reason. All variants are user-facing outcomes: none is retried.

use crate::error::{AppError, ErrorMetadata, LogLevel};

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// No caller identity, or the referenced invite does not exist.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Identity present but not entitled to act on the resource.
    #[error("Unauthorized")]
    Unauthorized,

    /// Workspace absent, or the identity is neither owner nor member.
    #[error("Workspace not found")]
    NotFound,

    /// The invite was consumed by an earlier acceptance.
    #[error("Invite already accepted")]
    AlreadyAccepted,

    /// The datastore could not answer the lookup.
    #[error("Datastore unavailable")]
    Unavailable(#[source] Box<AppError>),

    /// The acceptance transaction did not commit.
    #[error("Invite acceptance failed")]
    Failed(#[source] Box<AppError>),
}

impl AccessError {
    pub fn unavailable(err: AppError) -> Self {
        AccessError::Unavailable(Box::new(err))
    }

    pub fn failed(err: AppError) -> Self {
        AccessError::Failed(Box::new(err))
    }

    /// True for denials (the caller is not entitled); false for datastore failures.
    pub fn is_denial(&self) -> bool {
        !matches!(self, AccessError::Unavailable(_) | AccessError::Failed(_))
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => AppError::Unauthorized("Unauthorized!".to_string()),
            AccessError::Unauthorized => AppError::Forbidden("Unauthorized access!".to_string()),
            AccessError::NotFound => AppError::NotFound("Workspace not found".to_string()),
            AccessError::AlreadyAccepted => {
                AppError::Conflict("Invite already accepted".to_string())
            }
            AccessError::Unavailable(source) => {
                AppError::ServiceUnavailable(format!("Access check failed: {}", source))
            }
            AccessError::Failed(source) => AppError::TransactionFailed(source.to_string()),
        }
    }
}

impl ErrorMetadata for AccessError {
    fn http_status_code(&self) -> u16 {
        match self {
            AccessError::Unauthenticated => 401,
            AccessError::Unauthorized => 403,
            AccessError::NotFound => 404,
            AccessError::AlreadyAccepted => 409,
            AccessError::Unavailable(_) => 503,
            AccessError::Failed(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AccessError::Unauthenticated => "UNAUTHENTICATED",
            AccessError::Unauthorized => "UNAUTHORIZED",
            AccessError::NotFound => "NOT_FOUND",
            AccessError::AlreadyAccepted => "ALREADY_ACCEPTED",
            AccessError::Unavailable(_) => "UNAVAILABLE",
            AccessError::Failed(_) => "FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AccessError::Unauthenticated => Some("Sign in and try again"),
            AccessError::Unauthorized => Some("Sign in with the account the invite was sent to"),
            AccessError::NotFound => Some("Verify the workspace ID and your membership"),
            AccessError::AlreadyAccepted => None,
            AccessError::Unavailable(_) | AccessError::Failed(_) => {
                Some("Send a new request after a short delay")
            }
        }
    }

    fn client_message(&self) -> String {
        match self {
            AccessError::Unavailable(_) => "Workspace access could not be verified".to_string(),
            AccessError::Failed(_) => "Transaction failed!".to_string(),
            other => other.to_string(),
        }
    }

    fn is_sensitive(&self) -> bool {
        !self.is_denial()
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AccessError::Unavailable(_) | AccessError::Failed(_) => LogLevel::Error,
            AccessError::Unauthorized => LogLevel::Warn,
            _ => LogLevel::Debug,
        }
    }
}
