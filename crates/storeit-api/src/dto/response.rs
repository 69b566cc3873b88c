//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storeit_entity::usage::{SpaceUsage, UsageSummary};
use storeit_entity::user::User;
use storeit_service::file::DeleteOutcome;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Returned by sign-up and sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdResponse {
    /// Account the one-time code was sent for.
    pub account_id: String,
}

/// Returned once a session cookie has been set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Provider session id.
    pub session_id: String,
}

/// The signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User document id.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Email.
    pub email: String,
    /// Avatar URL.
    pub avatar: String,
    /// External account id.
    pub account_id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            avatar: user.avatar,
            account_id: user.account_id,
        }
    }
}

/// Result of a delete request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// `deleted` for the owner, `left` for a shared user.
    pub outcome: DeleteOutcome,
}

/// Quota snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageResponse {
    /// Per-bucket sizes.
    pub usage: SpaceUsage,
    /// Totals and category breakdown.
    pub summary: UsageSummary,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Provider in use.
    pub provider: String,
    /// Connected event stream subscribers.
    pub subscribers: usize,
    /// Server time.
    pub time: DateTime<Utc>,
}
