//! Service and repository initialization

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use zloom_core::Config;
use zloom_db::{InviteRepository, WorkspaceRepository};

use crate::services::EmailService;
use crate::state::AppState;

/// Build the process-lifetime clients and the application state.
pub fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let mailer = EmailService::from_config(config).context("Failed to configure SMTP")?;
    if mailer.is_none() {
        tracing::warn!("SMTP_HOST/SMTP_FROM not set, emails will not be sent");
    }

    let access_store = Arc::new(WorkspaceRepository::new(pool.clone()));
    let invite_store = Arc::new(InviteRepository::new(pool.clone()));

    let state = AppState::new(config.clone(), pool, access_store, invite_store, mailer);
    tracing::info!("Services initialized");

    Ok(Arc::new(state))
}
