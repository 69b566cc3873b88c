//! Integration tests for sign-up, OTP verification, password sign-in and
//! logout.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_sign_up_verify_and_me() {
    let app = helpers::TestApp::new();
    let cookie = app.sign_up("Ann Lee", "Ann@Example.com").await;
    assert!(cookie.starts_with("storeit-session="));

    let response = app.request("GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["email"], "ann@example.com");
    assert_eq!(response.data()["fullName"], "Ann Lee");
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/sign-up",
            Some(json!({ "fullName": "Ann", "email": "ann@example.com" })),
            None,
        )
        .await;
    let account_id = response.data()["accountId"].as_str().expect("accountId");
    let code = app.memory.accounts.last_code("ann@example.com").expect("code");

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/auth/verify")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            json!({ "accountId": account_id, "code": code }).to_string(),
        ))
        .expect("request");
    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .expect("response");
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("set-cookie")
        .to_string();

    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/"));
}

#[tokio::test]
async fn test_sign_up_twice_keeps_one_account() {
    let app = helpers::TestApp::new();
    let body = json!({ "fullName": "Ann", "email": "ann@example.com" });

    let first = app
        .request("POST", "/api/auth/sign-up", Some(body.clone()), None)
        .await;
    let second = app
        .request("POST", "/api/auth/sign-up", Some(body), None)
        .await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(first.data()["accountId"], second.data()["accountId"]);
    assert_eq!(app.memory.documents.count("users"), 1);
}

#[tokio::test]
async fn test_sign_in_existing_user() {
    let app = helpers::TestApp::new();
    app.sign_up("Ann", "ann@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/auth/sign-in",
            Some(json!({ "email": "ann@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let account_id = response.data()["accountId"].as_str().expect("accountId");
    let cookie = app.verify("ann@example.com", account_id).await;
    let me = app.request("GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_sign_in_unknown_user_is_not_found() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/sign-in",
            Some(json!({ "email": "nobody@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/sign-up",
            Some(json!({ "fullName": "Ann", "email": "not-an-email" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_wrong_code_is_unauthenticated() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/sign-up",
            Some(json!({ "fullName": "Ann", "email": "ann@example.com" })),
            None,
        )
        .await;
    let account_id = response.data()["accountId"].clone();

    let response = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "accountId": account_id, "code": "000000x" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.set_cookie.is_none());
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = helpers::TestApp::new();
    for (method, path) in [
        ("GET", "/api/auth/me"),
        ("GET", "/api/files"),
        ("GET", "/api/usage"),
        ("GET", "/api/dashboard"),
        ("GET", "/api/events"),
    ] {
        let response = app.request(method, path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(response.error_code(), "UNAUTHENTICATED");
    }

    let response = app
        .request("GET", "/api/files", None, Some("storeit-session=forged"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = helpers::TestApp::new();
    let cookie = app.sign_up("Ann", "ann@example.com").await;
    assert_eq!(app.memory.accounts.session_count(), 1);

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.set_cookie.as_deref(), Some("storeit-session="));
    assert_eq!(app.memory.accounts.session_count(), 0);

    let me = app.request("GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_is_ok() {
    let app = helpers::TestApp::new();
    let response = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_password_sign_in_creates_user_document() {
    let app = helpers::TestApp::new();
    app.memory
        .accounts
        .register_password_account("bob@example.com", "Bob", "hunter22")
        .expect("account");

    let response = app
        .request(
            "POST",
            "/api/auth/password",
            Some(json!({ "email": "bob@example.com", "password": "wrong" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/api/auth/password",
            Some(json!({ "email": "bob@example.com", "password": "hunter22" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let cookie = response.set_cookie.expect("cookie");

    let me = app.request("GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["fullName"], "Bob");
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["provider"], "memory");
}
