//! Shared HTTP plumbing for the Appwrite REST API.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use storeit_core::config::ProviderConfig;
use storeit_core::error::{AppError, ErrorKind};
use storeit_core::result::AppResult;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
const SESSION_HEADER: &str = "X-Appwrite-Session";
const RESPONSE_FORMAT_HEADER: &str = "X-Appwrite-Response-Format";
const RESPONSE_FORMAT: &str = "1.5.0";

/// Error body returned by Appwrite.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
}

/// Thin wrapper over `reqwest::Client` with project credentials.
#[derive(Clone)]
pub struct AppwriteClient {
    http: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
}

impl std::fmt::Debug for AppwriteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteClient")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .finish()
    }
}

impl AppwriteClient {
    /// Build a client from provider settings.
    pub fn new(config: &ProviderConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Absolute URL for an API path such as `/account`.
    pub(crate) fn url(&self, path: &str) -> AppResult<Url> {
        Url::parse(&format!("{}{}", self.endpoint, path))
            .map_err(|e| AppError::configuration(format!("Invalid provider URL for '{path}': {e}")))
    }

    /// Request authenticated with the server API key.
    pub(crate) fn server(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(PROJECT_HEADER, &self.project_id)
            .header(KEY_HEADER, &self.api_key)
            .header(RESPONSE_FORMAT_HEADER, RESPONSE_FORMAT)
    }

    /// Request acting as the user owning `secret`.
    pub(crate) fn as_session(&self, method: Method, url: Url, secret: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(PROJECT_HEADER, &self.project_id)
            .header(SESSION_HEADER, secret)
            .header(RESPONSE_FORMAT_HEADER, RESPONSE_FORMAT)
    }

    /// Send and decode a JSON response.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> AppResult<T> {
        let response = self.send(request, operation).await?;
        response.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Provider,
                format!("{operation}: unexpected response body: {e}"),
                e,
            )
        })
    }

    /// Send and discard the response body.
    pub(crate) async fn send_empty(&self, request: RequestBuilder, operation: &str) -> AppResult<()> {
        self.send(request, operation).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder, operation: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Provider,
                format!("{operation}: request failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "Provider response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<ErrorBody>().await.ok();
        Err(map_status(status, operation, body))
    }
}

fn map_status(status: StatusCode, operation: &str, body: Option<ErrorBody>) -> AppError {
    let detail = body
        .map(|b| {
            if b.kind.is_empty() {
                b.message
            } else {
                format!("{} ({})", b.message, b.kind)
            }
        })
        .unwrap_or_default();
    let message = format!("{operation}: provider returned {status}: {detail}");

    match status {
        StatusCode::NOT_FOUND => AppError::not_found(message),
        StatusCode::UNAUTHORIZED => AppError::authentication(message),
        StatusCode::CONFLICT => AppError::conflict(message),
        _ => AppError::provider(message),
    }
}
