//! Integration tests for `POST /api/store-metadata`.

mod helpers;

use axum::http::StatusCode;
use bytes::Bytes;
use serde_json::{Value, json};

use helpers::{MIB, TestApp};
use storeit_core::config::AppConfig;
use storeit_core::traits::{BlobStore, BlobUpload};

struct Owner {
    cookie: String,
    id: String,
    account_id: String,
}

async fn owner(app: &TestApp) -> Owner {
    member(app, "Ann", "ann@example.com").await
}

async fn member(app: &TestApp, name: &str, email: &str) -> Owner {
    let cookie = app.sign_up(name, email).await;
    let me = app.request("GET", "/api/auth/me", None, Some(&cookie)).await;
    Owner {
        id: me.data()["id"].as_str().expect("id").to_string(),
        account_id: me.data()["accountId"].as_str().expect("accountId").to_string(),
        cookie,
    }
}

async fn stored_blob(app: &TestApp, id: &str, len: usize) {
    app.memory
        .blobs
        .create_blob(BlobUpload {
            id: id.to_string(),
            name: "direct.bin".to_string(),
            content_type: None,
            data: Bytes::from(vec![0u8; len]),
        })
        .await
        .expect("blob");
}

fn metadata(owner: &Owner, name: &str, blob_id: &str, size: usize) -> Value {
    json!({
        "name": name,
        "size": size,
        "extension": "ignored",
        "type": "ignored",
        "url": "https://example.com/ignored",
        "accountId": owner.account_id,
        "ownerId": owner.id,
        "bucketFileId": blob_id,
        "path": "/",
    })
}

#[tokio::test]
async fn test_store_metadata_creates_document() {
    let app = TestApp::new();
    let owner = owner(&app).await;
    stored_blob(&app, "blob-1", 4096).await;

    let response = app
        .request(
            "POST",
            "/api/store-metadata",
            Some(metadata(&owner, "scan.jpeg", "blob-1", 1)),
            Some(&owner.cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["name"], "scan.jpeg");
    assert_eq!(response.body["type"], "image");
    assert_eq!(response.body["size"], 4096);
    assert_eq!(response.body["bucketFileId"], "blob-1");
    assert_eq!(response.body["owner"], owner.id.as_str());
    assert_eq!(app.used_in(&owner.cookie, "image").await, 4096);
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let app = TestApp::new();
    let owner = owner(&app).await;

    for field in ["name", "accountId", "ownerId", "bucketFileId"] {
        let mut body = metadata(&owner, "scan.jpeg", "blob-1", 10);
        body.as_object_mut().expect("object").remove(field);

        let response = app
            .request("POST", "/api/store-metadata", Some(body), Some(&owner.cookie))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{field}");
    }
    assert_eq!(app.memory.documents.count("files"), 0);
}

#[tokio::test]
async fn test_foreign_owner_is_forbidden() {
    let app = TestApp::new();
    let owner = owner(&app).await;
    stored_blob(&app, "blob-1", 10).await;

    let mut body = metadata(&owner, "scan.jpeg", "blob-1", 10);
    body["ownerId"] = json!("someone-else");

    let response = app
        .request("POST", "/api/store-metadata", Some(body), Some(&owner.cookie))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.memory.documents.count("files"), 0);
}

#[tokio::test]
async fn test_quota_excess_deletes_blob() {
    let mut config = AppConfig::default();
    config.storage.max_quota_bytes = MIB as u64;
    let app = TestApp::with_config(config);
    let owner = owner(&app).await;
    stored_blob(&app, "blob-big", 2 * MIB).await;

    let response = app
        .request(
            "POST",
            "/api/store-metadata",
            Some(metadata(&owner, "movie.mp4", "blob-big", 2 * MIB)),
            Some(&owner.cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "QUOTA_EXCEEDED");
    assert!(!app.memory.blobs.contains("blob-big"));
    assert_eq!(app.memory.documents.count("files"), 0);
}

#[tokio::test]
async fn test_unknown_blob_is_not_found() {
    let app = TestApp::new();
    let owner = owner(&app).await;

    let response = app
        .request(
            "POST",
            "/api/store-metadata",
            Some(metadata(&owner, "scan.jpeg", "missing", 10)),
            Some(&owner.cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_provider_failure_is_generic_500() {
    let app = TestApp::new();
    let owner = owner(&app).await;
    stored_blob(&app, "blob-1", 10).await;
    app.memory.documents.fail_creates(true);

    let response = app
        .request(
            "POST",
            "/api/store-metadata",
            Some(metadata(&owner, "scan.jpeg", "blob-1", 10)),
            Some(&owner.cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["message"], "Storage provider request failed");
    assert!(!app.memory.blobs.contains("blob-1"));
}

#[tokio::test]
async fn test_registered_blob_cannot_be_claimed() {
    let app = TestApp::new();
    let ann = owner(&app).await;
    let bob = member(&app, "Bob", "bob@example.com").await;

    let upload = app.upload(&ann.cookie, "photo.png", 1024).await;
    assert_eq!(upload.status, StatusCode::OK, "{:?}", upload.body);
    let blob_id = upload.data()["bucketFileId"]
        .as_str()
        .expect("bucketFileId")
        .to_string();
    let filler = app.upload(&bob.cookie, "filler.bin", 18 * MIB).await;
    assert_eq!(filler.status, StatusCode::OK, "{:?}", filler.body);

    let response = app
        .request(
            "POST",
            "/api/store-metadata",
            Some(metadata(&bob, "mine.png", &blob_id, 1024)),
            Some(&bob.cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT, "{:?}", response.body);
    assert_eq!(response.error_code(), "CONFLICT");
    assert!(app.memory.blobs.contains(&blob_id));
    assert_eq!(app.file_names(&ann.cookie, "").await, vec!["photo.png"]);
    assert_eq!(app.used_in(&ann.cookie, "image").await, 1024);
}
