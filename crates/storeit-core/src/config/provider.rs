//! Identity provider configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which backend serves blobs, documents and accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Appwrite over its REST API.
    Appwrite,
    /// In-process store, for local development and tests.
    #[default]
    Memory,
}

/// Connection settings for the backend-as-a-service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend kind.
    #[serde(default)]
    pub kind: ProviderKind,
    /// Base API URL, e.g. `https://cloud.appwrite.io/v1`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Project identifier.
    #[serde(default = "default_project_id")]
    pub project_id: String,
    /// Database holding the users and files collections.
    #[serde(default = "default_database_id")]
    pub database_id: String,
    /// Collection of User documents.
    #[serde(default = "default_users_collection")]
    pub users_collection_id: String,
    /// Collection of File documents.
    #[serde(default = "default_files_collection")]
    pub files_collection_id: String,
    /// Storage bucket for blobs.
    #[serde(default = "default_bucket_id")]
    pub bucket_id: String,
    /// Server API key. Never logged.
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// Explicit limit applied to full scans (quota computation).
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,
    /// HTTP client timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            endpoint: default_endpoint(),
            project_id: default_project_id(),
            database_id: default_database_id(),
            users_collection_id: default_users_collection(),
            files_collection_id: default_files_collection(),
            bucket_id: default_bucket_id(),
            api_key: String::new(),
            list_limit: default_list_limit(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Reject settings the selected backend cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.list_limit == 0 {
            return Err(AppError::configuration(
                "provider.list_limit must be greater than zero",
            ));
        }
        if self.kind == ProviderKind::Appwrite {
            let required = [
                ("endpoint", &self.endpoint),
                ("project_id", &self.project_id),
                ("database_id", &self.database_id),
                ("users_collection_id", &self.users_collection_id),
                ("files_collection_id", &self.files_collection_id),
                ("bucket_id", &self.bucket_id),
                ("api_key", &self.api_key),
            ];
            for (name, value) in required {
                if value.trim().is_empty() {
                    return Err(AppError::configuration(format!(
                        "provider.{name} is required for the appwrite provider"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "http://localhost/v1".to_string()
}

fn default_project_id() -> String {
    "storeit".to_string()
}

fn default_database_id() -> String {
    "storeit".to_string()
}

fn default_users_collection() -> String {
    "users".to_string()
}

fn default_files_collection() -> String {
    "files".to_string()
}

fn default_bucket_id() -> String {
    "files".to_string()
}

fn default_list_limit() -> u32 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}
