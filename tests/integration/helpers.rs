//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use storeit_api::router::build_router;
use storeit_api::state::AppState;
use storeit_core::config::AppConfig;
use storeit_provider::MemoryBackend;

/// One mebibyte.
pub const MIB: usize = 1024 * 1024;

const BOUNDARY: &str = "storeit-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Concrete in-memory provider, for reading OTP codes and inspecting stores
    pub memory: MemoryBackend,
    /// Application config
    pub config: AppConfig,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when the body is not JSON)
    pub body: Value,
    /// `name=value` of the first `Set-Cookie` header
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of a failure body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application over an empty memory provider
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.session.secure = false;
        Self::with_config(config)
    }

    /// Create a test application with custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let memory = MemoryBackend::new(&config.provider);
        let state = AppState::new(config.clone(), memory.backend());
        Self {
            router: build_router(state),
            memory,
            config,
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload `len` zero bytes as `name` through the multipart endpoint
    pub async fn upload(&self, cookie: &str, name: &str, len: usize) -> TestResponse {
        let mut body = Vec::with_capacity(len + 512);
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"path\"\r\n\r\n/\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.resize(body.len() + len, 0);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::COOKIE, cookie)
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Sign up, verify the mailed code, and return the session cookie
    pub async fn sign_up(&self, full_name: &str, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/sign-up",
                Some(serde_json::json!({ "fullName": full_name, "email": email })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Sign-up failed: {:?}",
            response.body
        );
        let account_id = response.data()["accountId"]
            .as_str()
            .expect("No accountId in sign-up response")
            .to_string();

        self.verify(email, &account_id).await
    }

    /// Verify the pending code for `email` and return the session cookie
    pub async fn verify(&self, email: &str, account_id: &str) -> String {
        let code = self
            .memory
            .accounts
            .last_code(email)
            .expect("No pending code");

        let response = self
            .request(
                "POST",
                "/api/auth/verify",
                Some(serde_json::json!({ "accountId": account_id, "code": code })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Verify failed: {:?}",
            response.body
        );

        response.set_cookie.expect("No session cookie set")
    }

    /// List the caller's files and return the document names
    pub async fn file_names(&self, cookie: &str, query: &str) -> Vec<String> {
        let response = self
            .request("GET", &format!("/api/files{query}"), None, Some(cookie))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.data()["documents"]
            .as_array()
            .expect("documents")
            .iter()
            .filter_map(|doc| doc["name"].as_str().map(String::from))
            .collect()
    }

    /// Bytes the caller uses in one bucket
    pub async fn used_in(&self, cookie: &str, bucket: &str) -> u64 {
        let response = self.request("GET", "/api/usage", None, Some(cookie)).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.data()["usage"][bucket]["size"]
            .as_u64()
            .expect("bucket size")
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_string());

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }
}
