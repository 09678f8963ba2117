//! HTTP handlers, one module per resource

pub mod auth;
pub mod comments;
pub mod folders;
pub mod invites;
pub mod users;
pub mod videos;
pub mod workspaces;
