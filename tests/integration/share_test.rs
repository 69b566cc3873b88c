//! Integration tests for sharing, leaving and the revalidation stream.

mod helpers;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use futures::StreamExt;
use serde_json::json;
use tower::ServiceExt;

use helpers::TestApp;

async fn shared_file(app: &TestApp, owner: &str, with: &[&str]) -> String {
    let uploaded = app.upload(owner, "plan.pdf", 100).await;
    let file_id = uploaded.data()["$id"].as_str().expect("id").to_string();
    let response = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/users"),
            Some(json!({ "emails": with, "path": "/documents" })),
            Some(owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    file_id
}

#[tokio::test]
async fn test_shared_user_sees_file() {
    let app = TestApp::new();
    let ann = app.sign_up("Ann", "ann@example.com").await;
    let bob = app.sign_up("Bob", "bob@example.com").await;

    shared_file(&app, &ann, &["Bob@Example.com"]).await;

    assert_eq!(app.file_names(&bob, "").await, vec!["plan.pdf"]);
    assert_eq!(app.used_in(&bob, "document").await, 100);
}

#[tokio::test]
async fn test_double_grant_keeps_one_entry() {
    let app = TestApp::new();
    let ann = app.sign_up("Ann", "ann@example.com").await;
    let file_id = shared_file(&app, &ann, &["bob@example.com", "bob@example.com"]).await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/users"),
            Some(json!({ "emails": ["BOB@example.com"] })),
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["users"], json!(["bob@example.com"]));
}

#[tokio::test]
async fn test_grant_validates_emails() {
    let app = TestApp::new();
    let ann = app.sign_up("Ann", "ann@example.com").await;
    let uploaded = app.upload(&ann, "plan.pdf", 100).await;
    let file_id = uploaded.data()["$id"].as_str().expect("id").to_string();

    for emails in [json!([]), json!(["not-an-email"])] {
        let response = app
            .request(
                "POST",
                &format!("/api/files/{file_id}/users"),
                Some(json!({ "emails": emails })),
                Some(&ann),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{emails}");
    }
}

#[tokio::test]
async fn test_only_owner_can_share() {
    let app = TestApp::new();
    let ann = app.sign_up("Ann", "ann@example.com").await;
    let bob = app.sign_up("Bob", "bob@example.com").await;
    let file_id = shared_file(&app, &ann, &["bob@example.com"]).await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/users"),
            Some(json!({ "emails": ["eve@example.com"] })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_revoke_absent_email_is_noop() {
    let app = TestApp::new();
    let ann = app.sign_up("Ann", "ann@example.com").await;
    let file_id = shared_file(&app, &ann, &["bob@example.com"]).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/files/{file_id}/users"),
            Some(json!({ "email": "carol@example.com" })),
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["users"], json!(["bob@example.com"]));
}

#[tokio::test]
async fn test_owner_revokes_access() {
    let app = TestApp::new();
    let ann = app.sign_up("Ann", "ann@example.com").await;
    let bob = app.sign_up("Bob", "bob@example.com").await;
    let file_id = shared_file(&app, &ann, &["bob@example.com"]).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/files/{file_id}/users"),
            Some(json!({ "email": "bob@example.com" })),
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["users"], json!([]));
    assert!(app.file_names(&bob, "").await.is_empty());
}

#[tokio::test]
async fn test_shared_user_delete_only_leaves() {
    let app = TestApp::new();
    let ann = app.sign_up("Ann", "ann@example.com").await;
    let bob = app.sign_up("Bob", "bob@example.com").await;
    let file_id = shared_file(&app, &ann, &["bob@example.com"]).await;

    let response = app
        .request("DELETE", &format!("/api/files/{file_id}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["outcome"], "left");

    assert!(app.file_names(&bob, "").await.is_empty());
    assert_eq!(app.file_names(&ann, "").await, vec!["plan.pdf"]);
    assert_eq!(app.memory.blobs.len(), 1);
}

#[tokio::test]
async fn test_event_stream_delivers_visible_events() {
    let app = TestApp::new();
    let ann = app.sign_up("Ann", "ann@example.com").await;
    let bob = app.sign_up("Bob", "bob@example.com").await;

    let req = Request::builder()
        .uri("/api/events")
        .header(header::COOKIE, &bob)
        .body(Body::empty())
        .expect("request");
    let response = app.router.clone().oneshot(req).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .starts_with("text/event-stream")
    );
    let mut frames = response.into_body().into_data_stream();

    // Not visible to Bob.
    app.upload(&ann, "private.txt", 10).await;
    shared_file(&app, &ann, &["bob@example.com"]).await;

    let frame = tokio::time::timeout(Duration::from_secs(5), frames.next())
        .await
        .expect("event within timeout")
        .expect("stream open")
        .expect("frame");
    let text = String::from_utf8_lossy(&frame).to_string();
    assert!(text.contains("event: revalidate"), "{text}");
    assert!(text.contains("SharingChanged"), "{text}");
    assert!(text.contains("/documents"), "{text}");
}
