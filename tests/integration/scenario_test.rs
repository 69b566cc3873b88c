//! End-to-end dashboard scenarios: upload within quota, upload past the
//! ceiling, sharing with another user, rename.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{MIB, TestApp};

#[tokio::test]
async fn test_upload_within_quota_then_rejected_past_ceiling() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;

    let response = app.upload(&cookie, "photo.png", 5 * MIB).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["type"], "image");
    assert_eq!(response.data()["size"], 5 * MIB);
    assert_eq!(response.data()["users"], json!([]));
    assert_eq!(app.used_in(&cookie, "image").await, (5 * MIB) as u64);

    let response = app.upload(&cookie, "clip.mp4", 16 * MIB).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "QUOTA_EXCEEDED");

    assert_eq!(app.memory.blobs.len(), 1);
    assert_eq!(app.file_names(&cookie, "").await, vec!["photo.png"]);
    assert_eq!(app.used_in(&cookie, "video").await, 0);
    assert_eq!(app.used_in(&cookie, "image").await, (5 * MIB) as u64);
}

#[tokio::test]
async fn test_upload_reaching_ceiling_exactly_is_admitted() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;

    assert_eq!(app.upload(&cookie, "a.bin", 15 * MIB).await.status, StatusCode::OK);
    assert_eq!(app.upload(&cookie, "b.bin", 5 * MIB).await.status, StatusCode::OK);
    assert_eq!(
        app.upload(&cookie, "c.bin", 1).await.status,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_share_then_shared_user_deletes() {
    let app = TestApp::new();
    let ann = app.sign_up("Ann", "ann@example.com").await;
    let bob = app.sign_up("Bob", "bob@example.com").await;

    let uploaded = app.upload(&ann, "photo.png", 1024).await;
    let file_id = uploaded.data()["$id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/files/{file_id}/users"),
            Some(json!({ "emails": ["bob@example.com"] })),
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.file_names(&bob, "?types=image").await, vec!["photo.png"]);

    let response = app
        .request("DELETE", &format!("/api/files/{file_id}"), None, Some(&bob))
        .await;
    assert_eq!(response.data()["outcome"], "left");

    assert!(app.file_names(&bob, "").await.is_empty());
    assert_eq!(app.file_names(&ann, "").await, vec!["photo.png"]);
}

#[tokio::test]
async fn test_rename_keeps_identity() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;
    let uploaded = app.upload(&cookie, "IMG_2041.png", 1024).await;
    let file_id = uploaded.data()["$id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{file_id}/name"),
            Some(json!({ "name": "vacation", "extension": "png" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "vacation.png");
    assert_eq!(response.data()["$id"], file_id.as_str());
    assert_eq!(response.data()["bucketFileId"], uploaded.data()["bucketFileId"]);
    assert_eq!(response.data()["url"], uploaded.data()["url"]);
    assert_eq!(app.file_names(&cookie, "").await, vec!["vacation.png"]);
}
