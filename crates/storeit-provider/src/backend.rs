//! Provider selection: bundles the blob store, document store and account
//! gateway chosen by configuration.

use std::sync::Arc;

use tracing::info;

use storeit_core::config::{ProviderConfig, ProviderKind};
use storeit_core::result::AppResult;
use storeit_core::traits::{AccountGateway, BlobStore, DocumentStore};

use crate::appwrite::{AppwriteAccounts, AppwriteClient, AppwriteDatabases, AppwriteStorage};
use crate::memory::MemoryBackend;

/// The three provider surfaces the services depend on.
#[derive(Debug, Clone)]
pub struct Backend {
    /// Object storage.
    pub blobs: Arc<dyn BlobStore>,
    /// Document database.
    pub documents: Arc<dyn DocumentStore>,
    /// Authentication.
    pub accounts: Arc<dyn AccountGateway>,
}

impl Backend {
    /// Build the backend named by `config.kind`.
    pub fn from_config(config: &ProviderConfig) -> AppResult<Self> {
        config.validate()?;
        match config.kind {
            ProviderKind::Appwrite => {
                let client = AppwriteClient::new(config)?;
                info!(
                    endpoint = %config.endpoint,
                    project_id = %config.project_id,
                    bucket_id = %config.bucket_id,
                    "Using Appwrite provider"
                );
                Ok(Self {
                    blobs: Arc::new(AppwriteStorage::new(client.clone(), config)),
                    documents: Arc::new(AppwriteDatabases::new(client.clone(), config)),
                    accounts: Arc::new(AppwriteAccounts::new(client)),
                })
            }
            ProviderKind::Memory => {
                info!("Using in-memory provider; data is lost on restart");
                Ok(MemoryBackend::new(config).backend())
            }
        }
    }
}
