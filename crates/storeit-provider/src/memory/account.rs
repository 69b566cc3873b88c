//! In-memory [`AccountGateway`] issuing one-time codes and session secrets.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use storeit_core::error::{AppError, ErrorKind};
use storeit_core::result::AppResult;
use storeit_core::traits::{Account, AccountGateway, ProviderSession};

use super::password::PasswordHasher;

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    password_hash: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredSession {
    id: String,
    account_id: String,
}

/// Account gateway keeping accounts, pending codes and sessions in memory.
///
/// Codes are six digits and single-use. Nothing is mailed; the code is
/// logged and can be read back with [`MemoryAccounts::last_code`].
#[derive(Debug, Default)]
pub struct MemoryAccounts {
    accounts: DashMap<String, StoredAccount>,
    by_email: DashMap<String, String>,
    codes: DashMap<String, String>,
    sessions: DashMap<String, StoredSession>,
    hasher: PasswordHasher,
}

impl MemoryAccounts {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending one-time code for `email`, if any.
    pub fn last_code(&self, email: &str) -> Option<String> {
        let account_id = self.by_email.get(&email.trim().to_lowercase())?.clone();
        self.codes.get(&account_id).map(|code| code.clone())
    }

    /// Create an account that signs in with a password. Returns its id.
    pub fn register_password_account(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> AppResult<String> {
        let email = email.trim().to_lowercase();
        if self.by_email.contains_key(&email) {
            return Err(AppError::conflict(format!("Account '{email}' already exists")));
        }
        let id = Uuid::new_v4().simple().to_string();
        let password_hash = self.hasher.hash_password(password)?;
        self.accounts.insert(
            id.clone(),
            StoredAccount {
                account: Account {
                    id: id.clone(),
                    email: email.clone(),
                    name: name.to_string(),
                },
                password_hash: Some(password_hash),
            },
        );
        self.by_email.insert(email, id.clone());
        Ok(id)
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn issue_session(&self, account_id: &str) -> ProviderSession {
        let session = ProviderSession {
            id: Uuid::new_v4().simple().to_string(),
            user_id: account_id.to_string(),
            secret: format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()),
        };
        self.sessions.insert(
            session.secret.clone(),
            StoredSession {
                id: session.id.clone(),
                account_id: account_id.to_string(),
            },
        );
        debug!(account_id = %account_id, session_id = %session.id, "Session created");
        session
    }
}

fn one_time_code() -> String {
    format!("{:06}", Uuid::new_v4().as_u128() % 1_000_000)
}

#[async_trait]
impl AccountGateway for MemoryAccounts {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn create_email_token(&self, account_id: &str, email: &str) -> AppResult<String> {
        let email = email.trim().to_lowercase();
        let id = self
            .by_email
            .entry(email.clone())
            .or_insert_with(|| {
                self.accounts.insert(
                    account_id.to_string(),
                    StoredAccount {
                        account: Account {
                            id: account_id.to_string(),
                            email: email.clone(),
                            name: String::new(),
                        },
                        password_hash: None,
                    },
                );
                account_id.to_string()
            })
            .clone();

        let code = one_time_code();
        self.codes.insert(id.clone(), code.clone());
        info!(account_id = %id, email = %email, code = %code, "One-time code issued");
        Ok(id)
    }

    async fn create_session(&self, account_id: &str, secret: &str) -> AppResult<ProviderSession> {
        let valid = self
            .codes
            .remove_if(account_id, |_, code| code == secret)
            .is_some();
        if !valid {
            return Err(AppError::authentication("Invalid or expired code"));
        }
        Ok(self.issue_session(account_id))
    }

    async fn create_email_password_session(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<ProviderSession> {
        let invalid = || AppError::authentication("Invalid credentials");
        let account_id = self
            .by_email
            .get(&email.trim().to_lowercase())
            .map(|id| id.clone())
            .ok_or_else(invalid)?;
        let hash = self
            .accounts
            .get(&account_id)
            .and_then(|stored| stored.password_hash.clone())
            .ok_or_else(invalid)?;

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let verified =
            tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Internal,
                        "Password verification task panicked",
                        e,
                    )
                })??;
        if !verified {
            return Err(invalid());
        }
        Ok(self.issue_session(&account_id))
    }

    async fn delete_session(&self, session_secret: &str, session_id: &str) -> AppResult<()> {
        let removed = self.sessions.remove_if(session_secret, |_, session| {
            session_id == "current" || session.id == session_id
        });
        match removed {
            Some((_, session)) => {
                debug!(account_id = %session.account_id, session_id = %session.id, "Session deleted");
                Ok(())
            }
            None => Err(AppError::authentication("Session not found")),
        }
    }

    async fn get_account(&self, session_secret: &str) -> AppResult<Account> {
        let account_id = self
            .sessions
            .get(session_secret)
            .map(|session| session.account_id.clone())
            .ok_or_else(|| AppError::authentication("Invalid session"))?;
        self.accounts
            .get(&account_id)
            .map(|stored| stored.account.clone())
            .ok_or_else(|| AppError::authentication("Account no longer exists"))
    }
}
