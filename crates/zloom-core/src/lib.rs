//! Zloom Core Library
//!
//! This crate provides the domain models, error types and configuration
//! shared by the database layer and the HTTP API.

pub mod access_error;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;

// Re-export commonly used types
pub use access_error::AccessError;
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use identity::{Identity, IdentityProfile};
