//! Zloom API library
//!
//! The router, state and services are exposed so integration tests can build
//! the application against their own stores.

mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;

pub mod auth;
pub mod error;
pub mod state;

pub use error::ErrorResponse;
pub use state::AppState;
