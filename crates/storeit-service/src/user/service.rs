//! Sign-up, one-time-code sign-in, password sign-in and sign-out.

use std::sync::Arc;

use tracing::{info, warn};

use storeit_auth::{Authenticator, UserDirectory};
use storeit_core::error::AppError;
use storeit_core::events::{AccountEvent, DomainEvent, EventPayload};
use storeit_core::traits::ProviderSession;
use storeit_entity::user::{CreateUser, User};

use crate::events::EventBus;
use crate::lock::KeyedMutex;
use crate::validation::normalize_email;

/// Longest accepted display name, in characters.
const MAX_FULL_NAME_LEN: usize = 100;

/// Manages account holders and their sessions.
#[derive(Debug, Clone)]
pub struct UserService {
    directory: Arc<UserDirectory>,
    authenticator: Arc<Authenticator>,
    /// Serializes sign-up per email.
    locks: KeyedMutex,
    events: EventBus,
    /// Avatar given to new users.
    avatar_placeholder_url: String,
}

impl UserService {
    /// Creates a user service.
    pub fn new(
        directory: Arc<UserDirectory>,
        authenticator: Arc<Authenticator>,
        locks: KeyedMutex,
        events: EventBus,
        avatar_placeholder_url: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            authenticator,
            locks,
            events,
            avatar_placeholder_url: avatar_placeholder_url.into(),
        }
    }

    /// Sends a one-time code and creates the User document on first sign-up.
    /// Returns the provider account id the code was issued for.
    pub async fn sign_up(&self, full_name: &str, email: &str) -> Result<String, AppError> {
        let email = normalize_email(email)?;
        let full_name = full_name.trim();
        if full_name.is_empty() || full_name.chars().count() > MAX_FULL_NAME_LEN {
            return Err(AppError::validation(format!(
                "Full name must be between 1 and {MAX_FULL_NAME_LEN} characters"
            )));
        }

        let _guard = self.locks.lock(&format!("signup:{email}")).await;

        let existing = self.directory.find_by_email(&email).await?;
        let account_id = self.authenticator.send_email_otp(&email).await?;

        if existing.is_none() {
            let user = self
                .directory
                .create(CreateUser {
                    email: email.clone(),
                    full_name: full_name.to_string(),
                    avatar: self.avatar_placeholder_url.clone(),
                    account_id: account_id.clone(),
                })
                .await?;
            self.publish(&user.id, AccountEvent::SignedUp {
                user_id: user.id.clone(),
                email,
            });
        }
        Ok(account_id)
    }

    /// Sends a one-time code to an existing user.
    pub async fn sign_in(&self, email: &str) -> Result<String, AppError> {
        let email = normalize_email(email)?;
        let user = self
            .directory
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        self.authenticator.send_email_otp(&email).await?;
        Ok(user.account_id)
    }

    /// Exchanges a one-time code for a session.
    pub async fn verify(&self, account_id: &str, code: &str) -> Result<ProviderSession, AppError> {
        let session = self.authenticator.verify_otp(account_id, code.trim()).await?;
        self.publish(&session.user_id, AccountEvent::SignedIn {
            account_id: session.user_id.clone(),
        });
        Ok(session)
    }

    /// Email and password sign-in. Accounts created outside StoreIt get a
    /// User document on first sign-in.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, AppError> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let session = self
            .authenticator
            .sign_in_with_password(&email, password)
            .await?;

        if self
            .directory
            .find_by_account_id(&session.user_id)
            .await?
            .is_none()
        {
            self.ensure_user(&email, &session).await?;
        }

        self.publish(&session.user_id, AccountEvent::SignedIn {
            account_id: session.user_id.clone(),
        });
        Ok(session)
    }

    /// Deletes the current session. A session the provider no longer knows
    /// counts as signed out.
    pub async fn sign_out(&self, secret: &str, user: Option<&User>) -> Result<(), AppError> {
        match self.authenticator.sign_out(secret).await {
            Ok(()) => {}
            Err(e) if e.is(storeit_core::error::ErrorKind::Authentication) => {
                warn!(error = %e, "Session already gone at sign-out");
            }
            Err(e) => return Err(e),
        }

        if let Some(user) = user {
            info!(user_id = %user.id, "Signed out");
            self.publish(&user.id, AccountEvent::SignedOut {
                user_id: user.id.clone(),
            });
        }
        Ok(())
    }

    /// Creates the User document for a password account unless another
    /// sign-in or sign-up got there first.
    async fn ensure_user(&self, email: &str, session: &ProviderSession) -> Result<(), AppError> {
        let _guard = self.locks.lock(&format!("signup:{email}")).await;

        if self
            .directory
            .find_by_account_id(&session.user_id)
            .await?
            .is_some()
        {
            return Ok(());
        }
        if let Some(existing) = self.directory.find_by_email(email).await? {
            warn!(
                user_id = %existing.id,
                account_id = %session.user_id,
                "User exists under another account id, not creating a second one"
            );
            return Ok(());
        }

        let account = self.authenticator.account(&session.secret).await?;
        let full_name = if account.name.trim().is_empty() {
            email.split('@').next().unwrap_or_default().to_string()
        } else {
            account.name
        };
        let user = self
            .directory
            .create(CreateUser {
                email: email.to_string(),
                full_name,
                avatar: self.avatar_placeholder_url.clone(),
                account_id: session.user_id.clone(),
            })
            .await?;
        info!(user_id = %user.id, "Created user on first password sign-in");
        Ok(())
    }

    /// Looks up a user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.directory.find_by_email(email).await
    }

    fn publish(&self, audience: &str, event: AccountEvent) {
        self.events.publish(DomainEvent::new(
            Some(audience.to_string()),
            vec![audience.to_string()],
            EventPayload::Account(event),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storeit_core::error::ErrorKind;

    use crate::test_support::Harness;

    #[tokio::test]
    async fn test_sign_up_twice_creates_one_user() {
        let h = Harness::new();
        let users = &h.services.users;

        let first = users.sign_up("Ann", "Ann@Example.com").await.expect("sign up");
        let second = users.sign_up("Ann", "ann@example.com").await.expect("sign up");
        assert_eq!(first, second);
        assert_eq!(h.memory.documents.count("users"), 1);

        let user = users
            .get_by_email("ann@example.com")
            .await
            .expect("lookup")
            .expect("user");
        assert_eq!(user.account_id, first);
        assert!(user.avatar.starts_with("http"));
    }

    #[tokio::test]
    async fn test_concurrent_sign_up_is_serialized() {
        let h = Harness::new();
        let users = h.services.users.clone();
        let (a, b) = tokio::join!(
            users.sign_up("Ann", "ann@example.com"),
            users.sign_up("Ann", "ann@example.com"),
        );
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(h.memory.documents.count("users"), 1);
    }

    #[tokio::test]
    async fn test_sign_in_unknown_user() {
        let h = Harness::new();
        let err = h
            .services
            .users
            .sign_in("ghost@example.com")
            .await
            .expect_err("unknown");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_otp_flow_resolves_session() {
        let h = Harness::new();
        let users = &h.services.users;
        users.sign_up("Ann", "ann@example.com").await.expect("sign up");
        let account_id = users.sign_in("ann@example.com").await.expect("sign in");

        let code = h.memory.accounts.last_code("ann@example.com").expect("code");
        let session = users.verify(&account_id, &code).await.expect("verify");

        let user = h
            .services
            .resolver
            .resolve_current_user(Some(&session.secret))
            .await
            .expect("resolved");
        assert_eq!(user.email, "ann@example.com");

        users.sign_out(&session.secret, Some(&user)).await.expect("sign out");
        assert!(
            h.services
                .resolver
                .resolve_current_user(Some(&session.secret))
                .await
                .is_none()
        );
        users
            .sign_out(&session.secret, None)
            .await
            .expect("second sign out is harmless");
    }

    #[tokio::test]
    async fn test_password_sign_in_creates_user_document() {
        let h = Harness::new();
        h.memory
            .accounts
            .register_password_account("pat@example.com", "Pat", "hunter22")
            .expect("register");

        let err = h
            .services
            .users
            .sign_in_with_password("pat@example.com", "wrong")
            .await
            .expect_err("bad password");
        assert_eq!(err.kind, ErrorKind::Authentication);

        let session = h
            .services
            .users
            .sign_in_with_password("pat@example.com", "hunter22")
            .await
            .expect("sign in");
        let user = h
            .services
            .resolver
            .resolve_current_user(Some(&session.secret))
            .await
            .expect("resolved");
        assert_eq!(user.full_name, "Pat");
    }

    #[tokio::test]
    async fn test_concurrent_first_password_sign_ins_create_one_user() {
        let h = Harness::new();
        h.memory
            .accounts
            .register_password_account("pat@example.com", "Pat", "hunter22")
            .expect("register");

        let users = h.services.users.clone();
        let (a, b, c) = tokio::join!(
            users.sign_in_with_password("pat@example.com", "hunter22"),
            users.sign_in_with_password("Pat@Example.com", "hunter22"),
            users.sign_in_with_password("pat@example.com", "hunter22"),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(h.memory.documents.count("users"), 1);

        users
            .sign_in_with_password("pat@example.com", "hunter22")
            .await
            .expect("repeat sign in");
        assert_eq!(h.memory.documents.count("users"), 1);
    }

    #[tokio::test]
    async fn test_sign_up_validates_input() {
        let h = Harness::new();
        let err = h
            .services
            .users
            .sign_up("", "ann@example.com")
            .await
            .expect_err("no name");
        assert_eq!(err.kind, ErrorKind::Validation);
        let err = h
            .services
            .users
            .sign_up("Ann", "not-an-email")
            .await
            .expect_err("bad email");
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
