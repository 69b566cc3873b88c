//! Account gateway trait for the provider's authentication API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Provider account bound to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// External account id.
    pub id: String,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// A session issued by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSession {
    /// Session id.
    pub id: String,
    /// Account the session belongs to.
    pub user_id: String,
    /// Secret stored in the session cookie.
    #[serde(skip_serializing)]
    pub secret: String,
}

/// Authentication operations of the identity provider.
#[async_trait]
pub trait AccountGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name.
    fn provider_type(&self) -> &str;

    /// Send a one-time code to `email`. `account_id` is used when the
    /// provider has to create the account; returns the id of the account
    /// the code was issued for (an existing account keeps its id).
    async fn create_email_token(&self, account_id: &str, email: &str) -> AppResult<String>;

    /// Exchange a one-time code for a session.
    async fn create_session(&self, account_id: &str, secret: &str) -> AppResult<ProviderSession>;

    /// Exchange email and password for a session.
    async fn create_email_password_session(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<ProviderSession>;

    /// Delete a session. `session_id` may be `"current"` for the session
    /// identified by `session_secret`.
    async fn delete_session(&self, session_secret: &str, session_id: &str) -> AppResult<()>;

    /// Resolve the account owning a session secret.
    async fn get_account(&self, session_secret: &str) -> AppResult<Account>;
}
