//! In-memory [`BlobStore`].

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use storeit_core::config::ProviderConfig;
use storeit_core::error::AppError;
use storeit_core::result::AppResult;
use storeit_core::traits::{BlobInfo, BlobStore, BlobUpload};

use crate::urls::BlobUrls;

#[derive(Debug, Clone)]
struct StoredBlob {
    name: String,
    mime_type: String,
    data: Bytes,
}

/// Blob store keeping contents in a concurrent map.
#[derive(Debug)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, StoredBlob>,
    urls: BlobUrls,
    fail_creates: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            blobs: DashMap::new(),
            urls: BlobUrls::new(config),
            fail_creates: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
        }
    }

    /// Make subsequent writes fail with a provider error.
    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent deletes fail with a provider error.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Whether a blob with this id is stored.
    pub fn contains(&self, id: &str) -> bool {
        self.blobs.contains_key(id)
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn create_blob(&self, upload: BlobUpload) -> AppResult<BlobInfo> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(AppError::provider("Simulated blob write failure"));
        }
        if self.blobs.contains_key(&upload.id) {
            return Err(AppError::conflict(format!(
                "Blob '{}' already exists",
                upload.id
            )));
        }

        let stored = StoredBlob {
            name: upload.name,
            mime_type: upload
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            data: upload.data,
        };
        let info = BlobInfo {
            id: upload.id.clone(),
            name: stored.name.clone(),
            size: stored.data.len() as u64,
            mime_type: stored.mime_type.clone(),
        };
        self.blobs.insert(upload.id, stored);
        debug!(blob_id = %info.id, size = info.size, "Stored blob in memory");
        Ok(info)
    }

    async fn get_blob(&self, id: &str) -> AppResult<BlobInfo> {
        self.blobs
            .get(id)
            .map(|blob| BlobInfo {
                id: id.to_string(),
                name: blob.name.clone(),
                size: blob.data.len() as u64,
                mime_type: blob.mime_type.clone(),
            })
            .ok_or_else(|| AppError::not_found(format!("Blob '{id}' not found")))
    }

    async fn delete_blob(&self, id: &str) -> AppResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::provider("Simulated blob delete failure"));
        }
        self.blobs.remove(id);
        Ok(())
    }

    fn view_url(&self, id: &str) -> String {
        self.urls.view(id)
    }

    fn download_url(&self, id: &str) -> String {
        self.urls.download(id)
    }
}
