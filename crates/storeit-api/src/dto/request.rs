//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use storeit_core::error::AppError;
use storeit_entity::file::FileType;
use storeit_service::file::ListFilesQuery;

/// Sign-up request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Full name is required"))]
    pub full_name: String,
    /// Account email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// OTP sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Account email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// OTP verification request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Account id returned by sign-up or sign-in.
    #[validate(length(min = 1, message = "Account id is required"))]
    pub account_id: String,
    /// The mailed one-time code.
    #[serde(alias = "password")]
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}

/// Email and password sign-in body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordSignInRequest {
    /// Account email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Query string of the listing endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ListFilesParams {
    /// Comma-separated file types, e.g. `image,video`.
    pub types: Option<String>,
    /// Name search text.
    pub q: Option<String>,
    /// `"field-direction"`.
    pub sort: Option<String>,
    /// Maximum number of files.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl ListFilesParams {
    /// Converts the raw query string into listing parameters.
    pub fn into_query(self) -> Result<ListFilesQuery, AppError> {
        let types = self
            .types
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::parse::<FileType>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ListFilesQuery {
            types,
            search_text: self.q,
            sort: self.sort,
            limit: self.limit,
        })
    }
}

/// Rename request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFileRequest {
    /// New name without extension.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Extension appended to the name.
    #[serde(default)]
    pub extension: String,
    /// Page to revalidate.
    #[serde(default)]
    pub path: String,
}

/// Query string of the delete endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileParams {
    /// Blob id the client believes backs the file.
    #[serde(default)]
    pub bucket_file_id: String,
    /// Owner email as displayed to the client.
    pub owner_email: Option<String>,
    /// Page to revalidate.
    #[serde(default)]
    pub path: String,
}

/// Grant access request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GrantAccessRequest {
    /// Emails to add to the sharing list.
    #[validate(length(min = 1, message = "At least one email is required"))]
    pub emails: Vec<String>,
    /// Page to revalidate.
    #[serde(default)]
    pub path: String,
}

/// Revoke access request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RevokeAccessRequest {
    /// Email to remove from the sharing list.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Page to revalidate.
    #[serde(default)]
    pub path: String,
}
