//! Zloom Database Layer
//!
//! This crate provides the Postgres repositories, the transaction helper and
//! the store traits through which the access and invite flows reach the
//! datastore.
//!
// Module declarations
pub mod db;
pub mod store_traits;
pub mod test_helpers;

// Re-exports: Repositories
pub use db::{
    CommentRepository, FolderRepository, InviteRepository, NotificationRepository,
    UserRepository, VideoRepository, WorkspaceRepository,
};

// Re-exports: Transaction utilities
pub use db::transaction::with_transaction;

// Re-exports: Store traits
pub use store_traits::{AcceptOutcome, InviteStore, WorkspaceAccessStore};
