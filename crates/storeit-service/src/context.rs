//! Request context carrying the signed-in user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storeit_entity::user::User;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from the session cookie and passed into service
/// methods so every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The resolved User document.
    pub user: User,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: User) -> Self {
        Self {
            user,
            request_time: Utc::now(),
        }
    }

    /// The User document id.
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// The user's email, as stored.
    pub fn email(&self) -> &str {
        &self.user.email
    }

    /// The user's external account id.
    pub fn account_id(&self) -> &str {
        &self.user.account_id
    }
}
