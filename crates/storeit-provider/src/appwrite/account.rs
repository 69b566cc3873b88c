//! Appwrite account API as an [`AccountGateway`].

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use storeit_core::error::AppError;
use storeit_core::result::AppResult;
use storeit_core::traits::{Account, AccountGateway, ProviderSession};

use super::client::AppwriteClient;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(rename = "userId")]
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(default)]
    secret: String,
}

impl TryFrom<SessionResponse> for ProviderSession {
    type Error = AppError;

    fn try_from(session: SessionResponse) -> Result<Self, Self::Error> {
        if session.secret.is_empty() {
            return Err(AppError::provider(
                "Provider returned a session without a secret; check the API key scopes",
            ));
        }
        Ok(Self {
            id: session.id,
            user_id: session.user_id,
            secret: session.secret,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(rename = "$id")]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
}

/// Account gateway backed by the Appwrite account and session endpoints.
#[derive(Debug, Clone)]
pub struct AppwriteAccounts {
    client: AppwriteClient,
}

impl AppwriteAccounts {
    /// Create a gateway over the shared client.
    pub fn new(client: AppwriteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountGateway for AppwriteAccounts {
    fn provider_type(&self) -> &str {
        "appwrite"
    }

    async fn create_email_token(&self, account_id: &str, email: &str) -> AppResult<String> {
        let url = self.client.url("/account/tokens/email")?;
        let body = json!({ "userId": account_id, "email": email });
        let token: TokenResponse = self
            .client
            .send_json(
                self.client.server(Method::POST, url).json(&body),
                "create email token",
            )
            .await?;
        Ok(token.user_id)
    }

    async fn create_session(&self, account_id: &str, secret: &str) -> AppResult<ProviderSession> {
        let url = self.client.url("/account/sessions/token")?;
        let body = json!({ "userId": account_id, "secret": secret });
        let session: SessionResponse = self
            .client
            .send_json(
                self.client.server(Method::POST, url).json(&body),
                "create session",
            )
            .await?;
        session.try_into()
    }

    async fn create_email_password_session(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<ProviderSession> {
        let url = self.client.url("/account/sessions/email")?;
        let body = json!({ "email": email, "password": password });
        let session: SessionResponse = self
            .client
            .send_json(
                self.client.server(Method::POST, url).json(&body),
                "create password session",
            )
            .await?;
        session.try_into()
    }

    async fn delete_session(&self, session_secret: &str, session_id: &str) -> AppResult<()> {
        let url = self.client.url(&format!("/account/sessions/{session_id}"))?;
        self.client
            .send_empty(
                self.client.as_session(Method::DELETE, url, session_secret),
                "delete session",
            )
            .await
    }

    async fn get_account(&self, session_secret: &str) -> AppResult<Account> {
        let url = self.client.url("/account")?;
        let account: AccountResponse = self
            .client
            .send_json(
                self.client.as_session(Method::GET, url, session_secret),
                "get account",
            )
            .await?;
        Ok(Account {
            id: account.id,
            email: account.email,
            name: account.name,
        })
    }
}
