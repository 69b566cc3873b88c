//! Session issuance: one-time email codes, password sign-in and sign-out.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use storeit_core::error::AppError;
use storeit_core::traits::{Account, AccountGateway, ProviderSession};

/// Issues and ends provider sessions.
#[derive(Debug, Clone)]
pub struct Authenticator {
    accounts: Arc<dyn AccountGateway>,
}

impl Authenticator {
    /// Creates an authenticator over the provider's account API.
    pub fn new(accounts: Arc<dyn AccountGateway>) -> Self {
        Self { accounts }
    }

    /// Mails a one-time code to `email` and returns the provider account id
    /// the code belongs to. Unknown emails get a new account.
    pub async fn send_email_otp(&self, email: &str) -> Result<String, AppError> {
        let candidate = Uuid::new_v4().simple().to_string();
        let account_id = self
            .accounts
            .create_email_token(&candidate, email)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to send email OTP"))?;

        info!(account_id = %account_id, "Email OTP sent");
        Ok(account_id)
    }

    /// Exchanges a one-time code for a session.
    pub async fn verify_otp(
        &self,
        account_id: &str,
        code: &str,
    ) -> Result<ProviderSession, AppError> {
        if account_id.is_empty() || code.is_empty() {
            return Err(AppError::validation("Account id and code are required"));
        }
        let session = self.accounts.create_session(account_id, code).await?;
        info!(account_id = %account_id, session_id = %session.id, "OTP verified");
        Ok(session)
    }

    /// Exchanges email and password for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, AppError> {
        let session = self
            .accounts
            .create_email_password_session(email, password)
            .await?;
        info!(account_id = %session.user_id, session_id = %session.id, "Password sign-in");
        Ok(session)
    }

    /// The provider account bound to a session secret.
    pub async fn account(&self, secret: &str) -> Result<Account, AppError> {
        self.accounts.get_account(secret).await
    }

    /// Deletes the session identified by `secret`.
    pub async fn sign_out(&self, secret: &str) -> Result<(), AppError> {
        self.accounts.delete_session(secret, "current").await
    }
}
