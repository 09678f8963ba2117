use crate::auth::jwt::JwtVerifier;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use zloom_core::AppError;

#[derive(Clone)]
pub struct AuthState {
    pub verifier: JwtVerifier,
}

/// Attach the caller's identity to the request.
///
/// A request without an `Authorization` header passes through with no
/// identity; the handlers decide whether one is required. A header that is
/// present but malformed, or carries an invalid token, is rejected with 401.
pub async fn identity_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return next.run(request).await;
    };

    let token = match header.to_str().ok().and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token.trim(),
        None => {
            tracing::debug!("Rejected request with malformed authorization header");
            return HttpAppError(AppError::Unauthorized(
                "Invalid authorization header format".to_string(),
            ))
            .into_response();
        }
    };

    match auth_state.verifier.verify(token) {
        Ok(claims) => {
            tracing::debug!(identity = %claims.sub, "Authenticated request");
            request.extensions_mut().insert(claims.profile());
            request.extensions_mut().insert(claims.identity());
            next.run(request).await
        }
        Err(e) => HttpAppError(e).into_response(),
    }
}
