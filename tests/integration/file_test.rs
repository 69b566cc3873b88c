//! Integration tests for upload, listing, rename and delete.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{MIB, TestApp};
use storeit_core::config::AppConfig;

#[tokio::test]
async fn test_upload_classifies_and_lists() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;

    let response = app.upload(&cookie, "Report.PDF", 2048).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let file = response.data();
    assert_eq!(file["name"], "Report.PDF");
    assert_eq!(file["type"], "document");
    assert_eq!(file["extension"], "pdf");
    assert_eq!(file["size"], 2048);
    assert_eq!(file["users"], json!([]));
    assert!(file["url"].as_str().unwrap_or_default().contains(file["bucketFileId"].as_str().unwrap_or("?")));

    assert_eq!(app.file_names(&cookie, "").await, vec!["Report.PDF"]);
    assert_eq!(app.memory.blobs.len(), 1);
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/files/upload")
        .header("content-type", "multipart/form-data; boundary=b")
        .header("cookie", &cookie)
        .body(axum::body::Body::from(
            "--b\r\nContent-Disposition: form-data; name=\"path\"\r\n\r\n/\r\n--b--\r\n",
        ))
        .expect("request");
    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected_before_storage() {
    let mut config = AppConfig::default();
    config.storage.max_file_size_bytes = MIB as u64;
    let app = TestApp::with_config(config);
    let cookie = app.sign_up("Ann", "ann@example.com").await;

    let response = app.upload(&cookie, "big.bin", MIB + MIB / 2).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.memory.blobs.is_empty());
}

#[tokio::test]
async fn test_bad_file_name_is_rejected() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;

    let response = app.upload(&cookie, "a<b>.txt", 10).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.memory.blobs.is_empty());
}

#[tokio::test]
async fn test_listing_filters_search_sort_and_limit() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;
    for (name, len) in [
        ("beach.png", 300),
        ("notes.txt", 100),
        ("budget.xlsx", 200),
        ("song.mp3", 400),
        ("backup.zip", 500),
    ] {
        let response = app.upload(&cookie, name, len).await;
        assert_eq!(response.status, StatusCode::OK, "{name}");
    }

    let mut others = app.file_names(&cookie, "?types=others").await;
    others.sort();
    assert_eq!(others, vec!["backup.zip", "budget.xlsx"]);

    assert_eq!(
        app.file_names(&cookie, "?types=image,audio&sort=size-desc").await,
        vec!["song.mp3", "beach.png"]
    );
    assert_eq!(app.file_names(&cookie, "?q=BEA").await, vec!["beach.png"]);
    assert_eq!(
        app.file_names(&cookie, "?sort=size-asc&limit=2").await,
        vec!["notes.txt", "budget.xlsx"]
    );

    let response = app
        .request("GET", "/api/files?sort=size-asc&limit=2", None, Some(&cookie))
        .await;
    assert_eq!(response.data()["total"], 5);
}

#[tokio::test]
async fn test_category_listing() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;
    app.upload(&cookie, "clip.mp4", 10).await;
    app.upload(&cookie, "song.mp3", 10).await;
    app.upload(&cookie, "photo.jpg", 10).await;

    let response = app
        .request("GET", "/api/files/category/media?sort=name-asc", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.data()["documents"]
        .as_array()
        .expect("documents")
        .iter()
        .filter_map(|d| d["name"].as_str())
        .collect();
    assert_eq!(names, vec!["clip.mp4", "song.mp3"]);

    let response = app
        .request("GET", "/api/files/category/videos", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_listing_parameters() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;

    for query in ["?sort=owner-asc", "?sort=name-sideways", "?types=bogus", "?limit=0"] {
        let response = app
            .request("GET", &format!("/api/files{query}"), None, Some(&cookie))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(response.error_code(), "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_listing_never_leaks_other_users_files() {
    let app = TestApp::new();
    let ann = app.sign_up("Ann", "ann@example.com").await;
    let bob = app.sign_up("Bob", "bob@example.com").await;

    app.upload(&ann, "ann.txt", 10).await;
    app.upload(&bob, "bob.txt", 10).await;

    assert_eq!(app.file_names(&ann, "").await, vec!["ann.txt"]);
    assert_eq!(app.file_names(&bob, "").await, vec!["bob.txt"]);
    assert_eq!(app.file_names(&bob, "?q=ann").await, Vec::<String>::new());
}

#[tokio::test]
async fn test_rename_keeps_blob() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;
    let uploaded = app.upload(&cookie, "IMG_0001.png", 10).await;
    let file_id = uploaded.data()["$id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{file_id}/name"),
            Some(json!({ "name": "vacation", "extension": "png", "path": "/images" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["name"], "vacation.png");
    assert_eq!(response.data()["bucketFileId"], uploaded.data()["bucketFileId"]);
    assert_eq!(response.data()["url"], uploaded.data()["url"]);
}

#[tokio::test]
async fn test_rename_missing_file_is_not_found() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;
    let response = app
        .request(
            "PATCH",
            "/api/files/missing/name",
            Some(json!({ "name": "x", "extension": "txt" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stranger_cannot_rename_or_delete() {
    let app = TestApp::new();
    let ann = app.sign_up("Ann", "ann@example.com").await;
    let eve = app.sign_up("Eve", "eve@example.com").await;
    let uploaded = app.upload(&ann, "secret.txt", 10).await;
    let file_id = uploaded.data()["$id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{file_id}/name"),
            Some(json!({ "name": "mine", "extension": "txt" })),
            Some(&eve),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/api/files/{file_id}"), None, Some(&eve))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.file_names(&ann, "").await, vec!["secret.txt"]);
}

#[tokio::test]
async fn test_owner_delete_removes_document_and_blob() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;
    let uploaded = app.upload(&cookie, "old.txt", 10).await;
    let file_id = uploaded.data()["$id"].as_str().expect("id").to_string();
    let blob_id = uploaded.data()["bucketFileId"].as_str().expect("blob").to_string();

    let response = app
        .request(
            "DELETE",
            &format!("/api/files/{file_id}?bucketFileId={blob_id}&path=/documents"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["outcome"], "deleted");
    assert!(!app.memory.blobs.contains(&blob_id));
    assert!(app.file_names(&cookie, "").await.is_empty());
    assert_eq!(app.used_in(&cookie, "document").await, 0);
}

#[tokio::test]
async fn test_dashboard_recent_files_and_summary() {
    let app = TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;
    app.upload(&cookie, "a.txt", 1000).await;
    app.upload(&cookie, "b.png", 3000).await;

    let response = app.request("GET", "/api/dashboard", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = response.data();
    assert_eq!(data["summary"]["used"], 4000);
    assert_eq!(data["summary"]["total"], 20 * MIB);
    assert_eq!(data["recentFiles"]["total"], 2);
    assert_eq!(data["usage"]["image"]["size"], 3000);
}
