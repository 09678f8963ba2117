//! Route configuration and setup.
//!
//! Versioned API routes are grouped per resource; health checks live in
//! [health](health).

mod health;

use crate::auth::{identity_middleware, AuthState, JwtVerifier};
use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch, post},
    Json, Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use zloom_core::Config;

/// Requests carry small JSON bodies only
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState {
        verifier: JwtVerifier::new(&config.jwt_secret),
    });

    let api = api_routes().layer(axum::middleware::from_fn_with_state(
        auth_state,
        identity_middleware,
    ));

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = public_routes()
        .merge(api)
        .merge(
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"),
        )
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::OPTIONS,
    ];
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };
    Ok(cors)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/auth/callback", API_PREFIX),
            post(handlers::auth::auth_callback),
        )
        .route(
            &format!("{}/workspaces", API_PREFIX),
            get(handlers::workspaces::list_workspaces).post(handlers::workspaces::create_workspace),
        )
        .route(
            &format!("{}/workspaces/{{id}}", API_PREFIX),
            get(handlers::workspaces::get_workspace),
        )
        .route(
            &format!("{}/workspaces/{{id}}/folders", API_PREFIX),
            get(handlers::folders::list_folders).post(handlers::folders::create_folder),
        )
        .route(
            &format!("{}/workspaces/{{id}}/videos", API_PREFIX),
            get(handlers::videos::list_workspace_videos),
        )
        .route(
            &format!("{}/workspaces/{{id}}/invites", API_PREFIX),
            post(handlers::invites::invite_member),
        )
        .route(
            &format!("{}/invites/{{id}}/accept", API_PREFIX),
            post(handlers::invites::accept_invite),
        )
        .route(
            &format!("{}/folders/{{id}}", API_PREFIX),
            get(handlers::folders::get_folder_info).patch(handlers::folders::rename_folder),
        )
        .route(
            &format!("{}/videos/{{id}}", API_PREFIX),
            get(handlers::videos::get_preview_video),
        )
        .route(
            &format!("{}/videos/{{id}}/location", API_PREFIX),
            patch(handlers::videos::move_video),
        )
        .route(
            &format!("{}/videos/{{id}}/views", API_PREFIX),
            post(handlers::videos::record_view),
        )
        .route(
            &format!("{}/videos/{{id}}/comments", API_PREFIX),
            get(handlers::comments::list_comments).post(handlers::comments::post_comment),
        )
        .route(
            &format!("{}/users/me", API_PREFIX),
            get(handlers::users::get_profile),
        )
        .route(
            &format!("{}/users/search", API_PREFIX),
            get(handlers::users::search_users),
        )
        .route(
            &format!("{}/users/me/notifications", API_PREFIX),
            get(handlers::users::list_notifications),
        )
        .route(
            &format!("{}/users/me/first-view", API_PREFIX),
            get(handlers::users::get_first_view).put(handlers::users::set_first_view),
        )
}
