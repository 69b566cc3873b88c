//! Appwrite storage bucket as a [`BlobStore`].

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info};

use storeit_core::config::ProviderConfig;
use storeit_core::error::{AppError, ErrorKind};
use storeit_core::result::AppResult;
use storeit_core::traits::{BlobInfo, BlobStore, BlobUpload};

use super::client::AppwriteClient;
use crate::urls::BlobUrls;

/// Appwrite rejects single requests above this size; larger blobs are sent
/// in `Content-Range` chunks.
const CHUNK_SIZE: usize = 5 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct StoredFile {
    #[serde(rename = "$id")]
    id: String,
    name: String,
    #[serde(rename = "mimeType", default)]
    mime_type: String,
    #[serde(rename = "sizeOriginal")]
    size_original: u64,
}

impl From<StoredFile> for BlobInfo {
    fn from(file: StoredFile) -> Self {
        Self {
            id: file.id,
            name: file.name,
            size: file.size_original,
            mime_type: file.mime_type,
        }
    }
}

/// Blob store backed by one Appwrite bucket.
#[derive(Debug, Clone)]
pub struct AppwriteStorage {
    client: AppwriteClient,
    bucket_id: String,
    urls: BlobUrls,
}

impl AppwriteStorage {
    /// Create a store for the configured bucket.
    pub fn new(client: AppwriteClient, config: &ProviderConfig) -> Self {
        Self {
            client,
            bucket_id: config.bucket_id.clone(),
            urls: BlobUrls::new(config),
        }
    }

    fn files_path(&self) -> String {
        format!("/storage/buckets/{}/files", self.bucket_id)
    }

    fn part(upload: &BlobUpload, bytes: Vec<u8>) -> AppResult<Part> {
        let part = Part::bytes(bytes).file_name(upload.name.clone());
        match &upload.content_type {
            Some(ct) => part.mime_str(ct).map_err(|e| {
                AppError::validation(format!("Invalid content type '{ct}': {e}"))
            }),
            None => Ok(part),
        }
    }
}

#[async_trait]
impl BlobStore for AppwriteStorage {
    fn provider_type(&self) -> &str {
        "appwrite"
    }

    async fn create_blob(&self, upload: BlobUpload) -> AppResult<BlobInfo> {
        let url = self.client.url(&self.files_path())?;
        let total = upload.data.len();

        if total <= CHUNK_SIZE {
            let form = Form::new()
                .text("fileId", upload.id.clone())
                .part("file", Self::part(&upload, upload.data.to_vec())?);
            let stored: StoredFile = self
                .client
                .send_json(
                    self.client.server(Method::POST, url).multipart(form),
                    "create blob",
                )
                .await?;
            info!(blob_id = %stored.id, size = stored.size_original, "Blob stored");
            return Ok(stored.into());
        }

        let mut last = None;
        for start in (0..total).step_by(CHUNK_SIZE) {
            let end = (start + CHUNK_SIZE).min(total);
            let form = Form::new()
                .text("fileId", upload.id.clone())
                .part("file", Self::part(&upload, upload.data.slice(start..end).to_vec())?);
            let mut request = self
                .client
                .server(Method::POST, url.clone())
                .header("Content-Range", format!("bytes {start}-{}/{total}", end - 1))
                .multipart(form);
            if start > 0 {
                request = request.header("X-Appwrite-ID", &upload.id);
            }
            debug!(blob_id = %upload.id, start, end, total, "Uploading blob chunk");
            last = Some(
                self.client
                    .send_json::<StoredFile>(request, "create blob chunk")
                    .await?,
            );
        }

        let stored = last.ok_or_else(|| AppError::internal("Chunked upload produced no chunks"))?;
        info!(blob_id = %stored.id, size = stored.size_original, "Blob stored in chunks");
        Ok(stored.into())
    }

    async fn get_blob(&self, id: &str) -> AppResult<BlobInfo> {
        let url = self.client.url(&format!("{}/{id}", self.files_path()))?;
        let stored: StoredFile = self
            .client
            .send_json(self.client.server(Method::GET, url), "get blob")
            .await?;
        Ok(stored.into())
    }

    async fn delete_blob(&self, id: &str) -> AppResult<()> {
        let url = self.client.url(&format!("{}/{id}", self.files_path()))?;
        match self
            .client
            .send_empty(self.client.server(Method::DELETE, url), "delete blob")
            .await
        {
            Err(e) if e.kind == ErrorKind::NotFound => {
                debug!(blob_id = %id, "Blob already absent");
                Ok(())
            }
            other => other,
        }
    }

    fn view_url(&self, id: &str) -> String {
        self.urls.view(id)
    }

    fn download_url(&self, id: &str) -> String {
        self.urls.download(id)
    }
}
