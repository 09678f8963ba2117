mod helpers;

use axum::http::{header, HeaderValue, StatusCode};
use helpers::{api_path, bearer, setup_test_app};
use uuid::Uuid;
use zloom_db::test_helpers::MemoryStore;

#[tokio::test]
async fn test_liveness_reports_ok() {
    let app = setup_test_app(MemoryStore::new());

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let app = setup_test_app(MemoryStore::new());

    let response = app.client().get("/health/ready").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app(MemoryStore::new());

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["paths"]["/api/v0/invites/{id}/accept"].is_object());
}

#[tokio::test]
async fn test_malformed_authorization_header_is_rejected() {
    let app = setup_test_app(MemoryStore::new());

    let response = app
        .client()
        .get(&api_path(&format!("/workspaces/{}", Uuid::new_v4())))
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Token abc"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let app = setup_test_app(MemoryStore::new());

    let response = app
        .client()
        .get(&api_path(&format!("/workspaces/{}", Uuid::new_v4())))
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer not-a-jwt"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_workspace_access_by_relation() {
    let store = MemoryStore::new();
    let owner = store.add_user("owner");
    let member = store.add_user("member");
    store.add_user("stranger");
    let workspace = store.add_workspace(owner, "Design");
    store.add_membership(member, workspace.id);
    let app = setup_test_app(store);
    let path = api_path(&format!("/workspaces/{}", workspace.id));

    for subject in ["owner", "member"] {
        let (name, value) = bearer(subject);
        let response = app.client().get(&path).add_header(name, value).await;
        assert_eq!(response.status_code(), StatusCode::OK, "{}", subject);
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "Design");
    }

    let (name, value) = bearer("stranger");
    let response = app.client().get(&path).add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app.client().get(&path).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_workspace_lookup_failure_is_unavailable() {
    let store = MemoryStore::new();
    let owner = store.add_user("owner");
    let workspace = store.add_workspace(owner, "Design");
    store.fail_lookups();
    let app = setup_test_app(store);

    let (name, value) = bearer("owner");
    let response = app
        .client()
        .get(&api_path(&format!("/workspaces/{}", workspace.id)))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_invite_acceptance_flow() {
    let store = MemoryStore::new();
    let owner = store.add_user("u1");
    let receiver = store.add_user("u2");
    store.add_user("u3");
    let workspace = store.add_workspace(owner, "w1");
    let invite = store.add_invite(receiver, workspace.id);
    let app = setup_test_app(store);
    let path = api_path(&format!("/invites/{}/accept", invite));

    let (name, value) = bearer("u3");
    let response = app.client().post(&path).add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(app.store.invite_accepted(invite), Some(false));

    let response = app.client().post(&path).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let (name, value) = bearer("u2");
    let response = app.client().post(&path).add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["membership"]["user_id"], receiver.to_string());
    assert_eq!(body["membership"]["workspace_id"], workspace.id.to_string());
    assert_eq!(app.store.invite_accepted(invite), Some(true));

    let (name, value) = bearer("u2");
    let response = app.client().post(&path).add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(app.store.memberships_of(workspace.id).len(), 1);

    // The new member now passes the access check.
    let (name, value) = bearer("u2");
    let response = app
        .client()
        .get(&api_path(&format!("/workspaces/{}", workspace.id)))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_invite_is_unauthenticated() {
    let app = setup_test_app(MemoryStore::new());

    let (name, value) = bearer("u2");
    let response = app
        .client()
        .post(&api_path(&format!("/invites/{}/accept", Uuid::new_v4())))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_anonymous_write_with_invalid_body_is_unauthenticated() {
    let app = setup_test_app(MemoryStore::new());
    let id = Uuid::new_v4();

    let requests = [
        (
            api_path(&format!("/workspaces/{}/invites", id)),
            serde_json::json!({ "receiver_id": Uuid::new_v4(), "email": "not-an-email" }),
        ),
        (api_path("/workspaces"), serde_json::json!({ "name": "   " })),
        (
            api_path(&format!("/videos/{}/comments", id)),
            serde_json::json!({ "comment_text": "" }),
        ),
    ];
    for (path, body) in requests {
        let response = app.client().post(&path).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", path);
    }

    let response = app
        .client()
        .patch(&api_path(&format!("/folders/{}", id)))
        .json(&serde_json::json!({ "name": "" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_invite_body_from_member_is_rejected() {
    let store = MemoryStore::new();
    let owner = store.add_user("owner");
    let workspace = store.add_workspace(owner, "Design");
    let app = setup_test_app(store);

    let (name, value) = bearer("owner");
    let response = app
        .client()
        .post(&api_path(&format!("/workspaces/{}/invites", workspace.id)))
        .add_header(name, value)
        .json(&serde_json::json!({ "receiver_id": Uuid::new_v4(), "email": "not-an-email" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_anonymous_view_is_unauthenticated() {
    let app = setup_test_app(MemoryStore::new());

    let response = app
        .client()
        .post(&api_path(&format!("/videos/{}/views", Uuid::new_v4())))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
