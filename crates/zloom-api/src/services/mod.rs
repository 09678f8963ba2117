//! Business logic behind the HTTP handlers.
//!
//! `access` and `invites` reach the datastore through store traits; the other
//! modules are workspace-scoped operations guarded by the access verifier.

pub mod access;
pub mod comments;
pub mod email;
pub mod folders;
pub mod invites;
pub mod users;
pub mod videos;
pub mod workspaces;

pub use access::AccessVerifier;
pub use comments::CommentService;
pub use email::EmailService;
pub use folders::FolderService;
pub use invites::{InviteAcceptor, InviteSender};
pub use users::UserService;
pub use videos::VideoService;
pub use workspaces::WorkspaceService;
