//! In-memory provider for local development and tests.
//!
//! Evaluates the same query vocabulary as the Appwrite backend, issues
//! six-digit one-time codes, and exposes switches to inject failures.

mod account;
mod blob;
mod document;
mod filter;
mod password;

use std::sync::Arc;

use storeit_core::config::ProviderConfig;

pub use account::MemoryAccounts;
pub use blob::MemoryBlobStore;
pub use document::MemoryDocumentStore;
pub use password::PasswordHasher;

use crate::backend::Backend;

/// Concrete handles to the in-memory stores.
///
/// Tests keep this around to inspect state and inject failures while the
/// services only see the trait objects from [`MemoryBackend::backend`].
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    /// Blob store.
    pub blobs: Arc<MemoryBlobStore>,
    /// Document store.
    pub documents: Arc<MemoryDocumentStore>,
    /// Account gateway.
    pub accounts: Arc<MemoryAccounts>,
}

impl MemoryBackend {
    /// Create empty stores. Blob URLs are built from `config`.
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            blobs: Arc::new(MemoryBlobStore::new(config)),
            documents: Arc::new(MemoryDocumentStore::new()),
            accounts: Arc::new(MemoryAccounts::new()),
        }
    }

    /// Trait-object view for the services.
    pub fn backend(&self) -> Backend {
        Backend {
            blobs: self.blobs.clone(),
            documents: self.documents.clone(),
            accounts: self.accounts.clone(),
        }
    }
}
