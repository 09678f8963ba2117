use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;
use zloom_core::{Identity, IdentityProfile};

/// The caller's identity, if the request carried a valid bearer token.
///
/// Extraction never fails: the services turn a missing identity into
/// `AccessError::Unauthenticated` where one is required.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentIdentity(parts.extensions.get::<Identity>().cloned()))
    }
}

/// Profile claims of the caller's token (empty without a token)
#[derive(Debug, Clone, Default)]
pub struct CurrentProfile(pub IdentityProfile);

impl<S> FromRequestParts<S> for CurrentProfile
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentProfile(
            parts
                .extensions
                .get::<IdentityProfile>()
                .cloned()
                .unwrap_or_default(),
        ))
    }
}
