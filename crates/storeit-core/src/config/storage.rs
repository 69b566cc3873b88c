//! Storage ceiling configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Per-user and per-file size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Total bytes a user may have visible before uploads are refused
    /// (default 20 MiB).
    #[serde(default = "default_max_quota")]
    pub max_quota_bytes: u64,
    /// Largest single upload accepted (default 50 MiB).
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_quota_bytes: default_max_quota(),
            max_file_size_bytes: default_max_file_size(),
        }
    }
}

impl StorageConfig {
    /// Both ceilings must be positive.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_quota_bytes == 0 || self.max_file_size_bytes == 0 {
            return Err(AppError::configuration(
                "storage limits must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn default_max_quota() -> u64 {
    20 * 1024 * 1024
}

fn default_max_file_size() -> u64 {
    50 * 1024 * 1024
}
