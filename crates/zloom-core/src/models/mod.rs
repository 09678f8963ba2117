//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod comment;
mod folder;
mod invite;
mod membership;
mod notification;
mod subscription;
mod user;
mod video;
mod workspace;

// Re-export all models for convenient imports
pub use comment::*;
pub use folder::*;
pub use invite::*;
pub use membership::*;
pub use notification::*;
pub use subscription::*;
pub use user::*;
pub use video::*;
pub use workspace::*;
