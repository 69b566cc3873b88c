//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::FileType;

/// An uploaded file: one blob plus its metadata document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Document id.
    #[serde(rename = "$id")]
    pub id: String,
    /// File name including extension.
    pub name: String,
    /// Size in bytes as reported by the blob store at upload time.
    pub size: u64,
    /// Lower-cased extension, empty when the name has none.
    pub extension: String,
    /// Classified type.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Public view URL of the blob.
    pub url: String,
    /// Id of the owning User document.
    pub owner: String,
    /// External account id of the owner.
    #[serde(rename = "accountId")]
    pub account_id: String,
    /// Emails the file is shared with.
    #[serde(default)]
    pub users: Vec<String>,
    /// Blob id in the storage bucket.
    #[serde(rename = "bucketFileId")]
    pub bucket_file_id: String,
    /// When the document was created.
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Whether the given user id owns the file.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner == user_id
    }

    /// Whether the email is on the sharing list.
    pub fn is_shared_with(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.eq_ignore_ascii_case(email))
    }

    /// Whether the user may see the file at all.
    pub fn is_visible_to(&self, user_id: &str, email: &str) -> bool {
        self.is_owned_by(user_id) || self.is_shared_with(email)
    }
}

/// Attributes written when creating a File document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// File name including extension.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Lower-cased extension.
    pub extension: String,
    /// Classified type.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Public view URL.
    pub url: String,
    /// Owner's User document id.
    pub owner: String,
    /// Owner's external account id.
    #[serde(rename = "accountId")]
    pub account_id: String,
    /// Initial sharing list (always empty for new uploads).
    pub users: Vec<String>,
    /// Blob id.
    #[serde(rename = "bucketFileId")]
    pub bucket_file_id: String,
}
