//! Database repositories for data access layer
//!
//! Each repository owns one table (or a small group of tables that are always
//! written together) and exposes the queries the services need.

pub mod comment;
pub mod folder;
pub mod invite;
pub mod notification;
pub mod transaction;
pub mod user;
pub mod video;
pub mod workspace;

pub use comment::CommentRepository;
pub use folder::FolderRepository;
pub use invite::InviteRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
pub use video::VideoRepository;
pub use workspace::WorkspaceRepository;
