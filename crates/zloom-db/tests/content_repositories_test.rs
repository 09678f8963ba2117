//! Repository tests for folders, videos and comments.
//!
//! Run with: `cargo test -p zloom-db --test content_repositories_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::{create_user, setup_test_db};
use sqlx::PgPool;
use uuid::Uuid;
use zloom_core::models::WorkspaceType;
use zloom_db::{
    CommentRepository, FolderRepository, NotificationRepository, UserRepository, VideoRepository,
    WorkspaceRepository,
};

async fn insert_video(
    pool: &PgPool,
    author: Uuid,
    workspace: Uuid,
    folder: Option<Uuid>,
    title: &str,
) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO videos (user_id, workspace_id, folder_id, title, source)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(author)
    .bind(workspace)
    .bind(folder)
    .bind(title)
    .bind(format!("{}.webm", title))
    .fetch_one(pool)
    .await
    .expect("Failed to insert video")
}

async fn enable_first_view(pool: &PgPool, user: Uuid) {
    sqlx::query("UPDATE users SET first_view = TRUE WHERE id = $1")
        .bind(user)
        .execute(pool)
        .await
        .expect("Failed to enable first view");
}

async fn views_of(pool: &PgPool, video: Uuid) -> i32 {
    sqlx::query_scalar("SELECT views FROM videos WHERE id = $1")
        .bind(video)
        .fetch_one(pool)
        .await
        .expect("Failed to read views")
}

#[tokio::test]
async fn test_folders_list_by_name_with_counts() {
    let db = setup_test_db().await;
    let users = UserRepository::new(db.pool.clone());
    let workspaces = WorkspaceRepository::new(db.pool.clone());
    let folders = FolderRepository::new(db.pool.clone());

    let owner = create_user(&users, "owner").await;
    let workspace = workspaces
        .create(owner, "Team", WorkspaceType::Public)
        .await
        .unwrap();

    let demos = folders.create(workspace.id).await.unwrap();
    let archive = folders.create(workspace.id).await.unwrap();
    assert_eq!(demos.name, "Untitled Folder");
    folders.rename(demos.id, "Demos").await.unwrap();
    folders.rename(archive.id, "Archive").await.unwrap();
    assert!(folders
        .rename(Uuid::new_v4(), "Nowhere")
        .await
        .unwrap()
        .is_none());

    insert_video(&db.pool, owner, workspace.id, Some(demos.id), "a").await;
    insert_video(&db.pool, owner, workspace.id, Some(demos.id), "b").await;
    insert_video(&db.pool, owner, workspace.id, None, "c").await;

    let listed = folders.list_with_counts(workspace.id).await.unwrap();
    let summary: Vec<_> = listed
        .iter()
        .map(|f| (f.name.as_str(), f.video_count))
        .collect();
    assert_eq!(summary, vec![("Archive", Some(0)), ("Demos", Some(2))]);

    let info = folders.info(demos.id).await.unwrap().unwrap();
    assert_eq!(info.name, "Demos");
    assert_eq!(info.video_count, 2);
    assert!(folders.info(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_videos_listed_by_workspace_or_folder_scope() {
    let db = setup_test_db().await;
    let users = UserRepository::new(db.pool.clone());
    let workspaces = WorkspaceRepository::new(db.pool.clone());
    let folders = FolderRepository::new(db.pool.clone());
    let videos = VideoRepository::new(db.pool.clone());

    let owner = create_user(&users, "owner").await;
    let workspace = workspaces
        .create(owner, "Team", WorkspaceType::Public)
        .await
        .unwrap();
    let folder = folders.create(workspace.id).await.unwrap();
    let loose = insert_video(&db.pool, owner, workspace.id, None, "loose").await;
    let filed = insert_video(&db.pool, owner, workspace.id, Some(folder.id), "filed").await;

    let in_workspace: Vec<_> = videos
        .list_in_scope(workspace.id)
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(in_workspace, vec![loose, filed]);

    let in_folder = videos.list_in_scope(folder.id).await.unwrap();
    assert_eq!(in_folder.len(), 1);
    assert_eq!(in_folder[0].id, filed);
    assert_eq!(in_folder[0].folder_name.as_deref(), Some("Untitled Folder"));
}

#[tokio::test]
async fn test_relocate_moves_video_and_clears_folder() {
    let db = setup_test_db().await;
    let users = UserRepository::new(db.pool.clone());
    let workspaces = WorkspaceRepository::new(db.pool.clone());
    let folders = FolderRepository::new(db.pool.clone());
    let videos = VideoRepository::new(db.pool.clone());

    let owner = create_user(&users, "owner").await;
    let source = workspaces
        .create(owner, "Source", WorkspaceType::Public)
        .await
        .unwrap();
    let target = workspaces
        .create(owner, "Target", WorkspaceType::Public)
        .await
        .unwrap();
    let folder = folders.create(source.id).await.unwrap();
    let video = insert_video(&db.pool, owner, source.id, Some(folder.id), "clip").await;

    let moved = videos.relocate(video, target.id, None).await.unwrap().unwrap();
    assert_eq!(moved.workspace_id, target.id);
    assert_eq!(moved.folder_id, None);
    assert!(videos.list_in_scope(folder.id).await.unwrap().is_empty());

    assert!(videos
        .relocate(Uuid::new_v4(), target.id, None)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_comment_thread_refs() {
    let db = setup_test_db().await;
    let users = UserRepository::new(db.pool.clone());
    let workspaces = WorkspaceRepository::new(db.pool.clone());
    let comments = CommentRepository::new(db.pool.clone());

    let owner = create_user(&users, "owner").await;
    let workspace = workspaces
        .create(owner, "Team", WorkspaceType::Public)
        .await
        .unwrap();
    let video = insert_video(&db.pool, owner, workspace.id, None, "clip").await;

    let top = comments.create(video, owner, None, "first").await.unwrap();
    assert_eq!(top.first_name.as_deref(), Some("owner"));
    let reply = comments
        .create(video, owner, Some(top.id), "second")
        .await
        .unwrap();

    assert_eq!(
        comments.find_thread_ref(top.id).await.unwrap(),
        Some((video, None))
    );
    assert_eq!(
        comments.find_thread_ref(reply.id).await.unwrap(),
        Some((video, Some(top.id)))
    );
    assert!(comments
        .find_thread_ref(Uuid::new_v4())
        .await
        .unwrap()
        .is_none());

    let texts: Vec<_> = comments
        .list_for_video(video)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.comment_text)
        .collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn test_first_view_counts_once_and_notifies_author() {
    let db = setup_test_db().await;
    let users = UserRepository::new(db.pool.clone());
    let workspaces = WorkspaceRepository::new(db.pool.clone());
    let videos = VideoRepository::new(db.pool.clone());
    let notifications = NotificationRepository::new(db.pool.clone());

    let author = create_user(&users, "author").await;
    create_user(&users, "viewer").await;
    let workspace = workspaces
        .create(author, "Team", WorkspaceType::Public)
        .await
        .unwrap();
    let video = insert_video(&db.pool, author, workspace.id, None, "Standup").await;

    // Alerts are off by default
    assert!(videos
        .record_first_view(video, "viewer")
        .await
        .unwrap()
        .is_none());
    assert_eq!(views_of(&db.pool, video).await, 0);

    enable_first_view(&db.pool, author).await;

    // The author's own view is not a first view
    assert!(videos
        .record_first_view(video, "author")
        .await
        .unwrap()
        .is_none());

    let first_view = videos
        .record_first_view(video, "viewer")
        .await
        .unwrap()
        .expect("first view");
    assert_eq!(first_view.author_id, author);
    assert_eq!(first_view.author_email, "author@zloom.test");
    assert_eq!(views_of(&db.pool, video).await, 1);

    assert!(videos
        .record_first_view(video, "viewer")
        .await
        .unwrap()
        .is_none());
    assert_eq!(views_of(&db.pool, video).await, 1);

    let (listed, count) = notifications.list_for_user(author).await.unwrap();
    assert_eq!(count, 1);
    assert_eq!(listed[0].content, "Your video Standup just got its first viewer");
}

#[tokio::test]
async fn test_concurrent_first_views_notify_once() {
    let db = setup_test_db().await;
    let users = UserRepository::new(db.pool.clone());
    let workspaces = WorkspaceRepository::new(db.pool.clone());
    let videos = VideoRepository::new(db.pool.clone());

    let author = create_user(&users, "author").await;
    let workspace = workspaces
        .create(author, "Team", WorkspaceType::Public)
        .await
        .unwrap();
    enable_first_view(&db.pool, author).await;
    let video = insert_video(&db.pool, author, workspace.id, None, "Standup").await;

    let handles: Vec<_> = ["viewer_a", "viewer_b"]
        .into_iter()
        .map(|subject| {
            let videos = videos.clone();
            tokio::spawn(async move { videos.record_first_view(video, subject).await })
        })
        .collect();

    let mut first_views = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_some() {
            first_views += 1;
        }
    }
    assert_eq!(first_views, 1);
    assert_eq!(views_of(&db.pool, video).await, 1);
}
