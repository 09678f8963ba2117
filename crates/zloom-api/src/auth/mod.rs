//! Identity provider integration: bearer token verification, the identity
//! middleware and the extractors handlers use to read the caller.

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{IdentityClaims, JwtVerifier};
pub use middleware::{identity_middleware, AuthState};
pub use models::{CurrentIdentity, CurrentProfile};
