//! Application state shared by all handlers.
//!
//! Process-lifetime clients (pool, mailer) are built once in `setup::services`
//! and handed to the services here. The access and invite flows reach the
//! datastore through store traits so tests can swap in an in-memory store.

use sqlx::PgPool;
use std::sync::Arc;
use zloom_core::Config;
use zloom_db::{
    CommentRepository, FolderRepository, InviteRepository, InviteStore, NotificationRepository,
    UserRepository, VideoRepository, WorkspaceAccessStore, WorkspaceRepository,
};

use crate::services::{
    AccessVerifier, CommentService, EmailService, FolderService, InviteAcceptor, InviteSender,
    UserService, VideoService, WorkspaceService,
};

/// Database pool, used directly only by the readiness check.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
}

pub struct AppState {
    pub db: DbState,
    pub invite_acceptor: InviteAcceptor,
    pub invite_sender: InviteSender,
    pub users: UserService,
    pub workspaces: WorkspaceService,
    pub folders: FolderService,
    pub videos: VideoService,
    pub comments: CommentService,
    pub config: Config,
}

impl AppState {
    pub fn new(
        config: Config,
        pool: PgPool,
        access_store: Arc<dyn WorkspaceAccessStore>,
        invite_store: Arc<dyn InviteStore>,
        mailer: Option<EmailService>,
    ) -> Self {
        let user_repository = UserRepository::new(pool.clone());
        let workspace_repository = WorkspaceRepository::new(pool.clone());
        let folder_repository = FolderRepository::new(pool.clone());
        let video_repository = VideoRepository::new(pool.clone());

        let access = AccessVerifier::new(access_store);

        AppState {
            invite_acceptor: InviteAcceptor::new(invite_store),
            invite_sender: InviteSender::new(
                access.clone(),
                user_repository.clone(),
                workspace_repository.clone(),
                InviteRepository::new(pool.clone()),
                mailer.clone(),
                config.frontend_url.clone(),
            ),
            users: UserService::new(
                user_repository.clone(),
                workspace_repository.clone(),
                NotificationRepository::new(pool.clone()),
            ),
            workspaces: WorkspaceService::new(
                access.clone(),
                user_repository.clone(),
                workspace_repository,
            ),
            folders: FolderService::new(access.clone(), folder_repository.clone()),
            videos: VideoService::new(
                access,
                folder_repository,
                video_repository.clone(),
                mailer,
            ),
            comments: CommentService::new(
                user_repository,
                video_repository,
                CommentRepository::new(pool.clone()),
            ),
            config,
            db: DbState { pool },
        }
    }
}
