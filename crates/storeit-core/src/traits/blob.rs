//! Blob store trait for the provider's object storage bucket.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A blob to be written.
#[derive(Debug, Clone)]
pub struct BlobUpload {
    /// Id to store the blob under.
    pub id: String,
    /// Original file name.
    pub name: String,
    /// Content type sent by the client, if any.
    pub content_type: Option<String>,
    /// Raw bytes.
    pub data: Bytes,
}

/// Metadata the provider reports for a stored blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobInfo {
    /// Blob id within the bucket.
    pub id: String,
    /// Stored file name.
    pub name: String,
    /// Byte length as measured by the provider.
    pub size: u64,
    /// MIME type recorded by the provider.
    pub mime_type: String,
}

/// Object storage for uploaded file contents.
///
/// Implemented in `storeit-provider` for Appwrite storage buckets and for
/// the in-memory development backend.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "appwrite", "memory").
    fn provider_type(&self) -> &str;

    /// Write a blob and return the provider's view of it.
    async fn create_blob(&self, upload: BlobUpload) -> AppResult<BlobInfo>;

    /// Fetch metadata for an existing blob.
    async fn get_blob(&self, id: &str) -> AppResult<BlobInfo>;

    /// Delete a blob. Deleting a blob that does not exist succeeds.
    async fn delete_blob(&self, id: &str) -> AppResult<()>;

    /// Public URL rendering the blob inline.
    fn view_url(&self, id: &str) -> String;

    /// Public URL serving the blob as an attachment.
    fn download_url(&self, id: &str) -> String;
}
