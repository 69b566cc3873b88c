//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account holder, stored in the users collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Document id.
    #[serde(rename = "$id")]
    pub id: String,
    /// Unique email address.
    pub email: String,
    /// Display name.
    #[serde(rename = "fullname")]
    pub full_name: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: String,
    /// External account id at the identity provider.
    #[serde(rename = "accountId")]
    pub account_id: String,
    /// When the user was created.
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the user was last updated.
    #[serde(rename = "$updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Attributes written when creating a User document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address (normalized by the caller).
    pub email: String,
    /// Display name.
    #[serde(rename = "fullname")]
    pub full_name: String,
    /// Avatar URL.
    pub avatar: String,
    /// External account id.
    #[serde(rename = "accountId")]
    pub account_id: String,
}
