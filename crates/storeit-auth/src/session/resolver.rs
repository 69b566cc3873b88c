//! Resolves the session cookie to the signed-in user.

use std::sync::Arc;

use tracing::{debug, warn};

use storeit_core::error::AppError;
use storeit_core::traits::AccountGateway;
use storeit_entity::user::User;

use crate::directory::UserDirectory;

/// Maps a session secret to its User document.
///
/// Read-only and safe to call on every request. Every failure (expired
/// session, unknown account, provider outage) resolves to `None`.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    accounts: Arc<dyn AccountGateway>,
    directory: Arc<UserDirectory>,
}

impl SessionResolver {
    /// Creates a resolver.
    pub fn new(accounts: Arc<dyn AccountGateway>, directory: Arc<UserDirectory>) -> Self {
        Self {
            accounts,
            directory,
        }
    }

    /// Returns the user bound to `secret`, or `None`.
    pub async fn resolve_current_user(&self, secret: Option<&str>) -> Option<User> {
        let secret = secret.filter(|s| !s.is_empty())?;

        let account = match self.accounts.get_account(secret).await {
            Ok(account) => account,
            Err(e) => {
                warn!(error = %e, "Session rejected by provider");
                return None;
            }
        };

        match self.directory.find_by_account_id(&account.id).await {
            Ok(Some(user)) => Some(user),
            Ok(None) => {
                debug!(account_id = %account.id, "No user document for account");
                None
            }
            Err(e) => {
                warn!(account_id = %account.id, error = %e, "User lookup failed");
                None
            }
        }
    }

    /// Like [`resolve_current_user`](Self::resolve_current_user) but fails
    /// with an authentication error when nobody is signed in.
    pub async fn require_user(&self, secret: Option<&str>) -> Result<User, AppError> {
        self.resolve_current_user(secret)
            .await
            .ok_or_else(|| AppError::authentication("Not signed in"))
    }
}
