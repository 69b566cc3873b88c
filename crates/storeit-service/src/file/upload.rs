//! Upload orchestration: blob write, quota admission, metadata document.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info, warn};
use uuid::Uuid;

use storeit_core::config::StorageConfig;
use storeit_core::error::AppError;
use storeit_core::events::{DomainEvent, EventPayload, FileEvent};
use storeit_core::traits::{BlobInfo, BlobStore, BlobUpload};
use storeit_entity::file::{CreateFile, File, classify};

use super::records::FileRecords;
use crate::context::RequestContext;
use crate::events::EventBus;
use crate::lock::KeyedMutex;
use crate::usage::QuotaService;
use crate::validation::validate_file_name;

/// A file sent through the server.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Client file name, extension included.
    pub name: String,
    /// Content type reported by the client.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
    /// Page to revalidate afterwards.
    pub path: String,
}

/// Metadata for a blob the client wrote to the bucket directly.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMetadataRequest {
    /// File name, extension included.
    pub name: Option<String>,
    /// Size claimed by the client. The provider's figure wins.
    pub size: Option<u64>,
    /// Owner's external account id.
    pub account_id: Option<String>,
    /// Owner's User document id.
    pub owner_id: Option<String>,
    /// Id of the already-stored blob.
    pub bucket_file_id: Option<String>,
    /// Page to revalidate afterwards.
    #[serde(default)]
    pub path: String,
}

/// Coordinates the blob store and the files collection so that a File
/// document never exists without its blob and admitted uploads never push
/// the owner past the ceiling.
#[derive(Clone)]
pub struct UploadService {
    /// Blob store.
    blobs: Arc<dyn BlobStore>,
    /// File documents.
    records: Arc<FileRecords>,
    /// Usage computation.
    quota: Arc<QuotaService>,
    /// Per-owner admission lock.
    locks: KeyedMutex,
    /// Revalidation events.
    events: EventBus,
    /// Size ceilings.
    config: StorageConfig,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("config", &self.config)
            .finish()
    }
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        records: Arc<FileRecords>,
        quota: Arc<QuotaService>,
        locks: KeyedMutex,
        events: EventBus,
        config: StorageConfig,
    ) -> Self {
        Self {
            blobs,
            records,
            quota,
            locks,
            events,
            config,
        }
    }

    /// Stores a file for the current user.
    pub async fn upload(&self, ctx: &RequestContext, req: UploadRequest) -> Result<File, AppError> {
        if req.data.len() as u64 > self.config.max_file_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.config.max_file_size_bytes
            )));
        }
        validate_file_name(&req.name)?;
        let name = req.name.trim().to_string();

        let blob = self
            .blobs
            .create_blob(BlobUpload {
                id: Uuid::new_v4().simple().to_string(),
                name: name.clone(),
                content_type: req.content_type,
                data: req.data,
            })
            .await?;

        let file = self.admit(ctx, &name, &blob).await?;

        info!(
            user_id = %ctx.user_id(),
            file_id = %file.id,
            blob_id = %blob.id,
            size = file.size,
            "Upload completed"
        );
        self.publish_uploaded(ctx, &file, req.path);
        Ok(file)
    }

    /// Records a blob that was uploaded directly to the bucket.
    pub async fn store_metadata(
        &self,
        ctx: &RequestContext,
        req: StoreMetadataRequest,
    ) -> Result<File, AppError> {
        let (Some(name), Some(account_id), Some(owner_id), Some(bucket_file_id)) = (
            non_empty(req.name),
            non_empty(req.account_id),
            non_empty(req.owner_id),
            non_empty(req.bucket_file_id),
        ) else {
            return Err(AppError::validation(
                "name, accountId, ownerId and bucketFileId are required",
            ));
        };
        validate_file_name(&name)?;

        if owner_id != ctx.user_id() || account_id != ctx.account_id() {
            return Err(AppError::authorization(
                "Metadata can only be stored for your own files",
            ));
        }

        // Held until the document exists so a second claim sees it.
        let _claim = self.locks.lock(&format!("blob:{bucket_file_id}")).await;
        if let Some(existing) = self.records.find_by_blob(&bucket_file_id).await? {
            warn!(
                user_id = %ctx.user_id(),
                blob_id = %bucket_file_id,
                file_id = %existing.id,
                "Metadata refused, blob already belongs to a file"
            );
            return Err(AppError::conflict("This blob is already registered to a file"));
        }

        let blob = self.blobs.get_blob(&bucket_file_id).await?;
        if let Some(claimed) = req.size.filter(|claimed| *claimed != blob.size) {
            warn!(
                blob_id = %blob.id,
                claimed,
                actual = blob.size,
                "Client-reported size differs from stored blob"
            );
        }

        let file = self.admit(ctx, &name, &blob).await?;

        info!(
            user_id = %ctx.user_id(),
            file_id = %file.id,
            blob_id = %blob.id,
            size = file.size,
            "Metadata stored"
        );
        self.publish_uploaded(ctx, &file, req.path);
        Ok(file)
    }

    /// Quota check and document creation for a stored blob, serialized per
    /// owner. The blob is deleted when the upload is refused or the document
    /// cannot be written.
    async fn admit(&self, ctx: &RequestContext, name: &str, blob: &BlobInfo) -> Result<File, AppError> {
        let _guard = self.locks.lock(ctx.user_id()).await;

        let usage = match self.quota.compute_used_space(ctx).await {
            Ok(usage) => usage,
            Err(e) => {
                self.discard_blob(&blob.id).await;
                return Err(e);
            }
        };

        if usage.would_exceed(blob.size, self.config.max_quota_bytes) {
            self.discard_blob(&blob.id).await;
            warn!(
                user_id = %ctx.user_id(),
                used = usage.total(),
                size = blob.size,
                ceiling = self.config.max_quota_bytes,
                "Upload refused, quota exceeded"
            );
            return Err(AppError::quota_exceeded(format!(
                "Uploading {} bytes would exceed the storage limit of {} bytes",
                blob.size, self.config.max_quota_bytes
            )));
        }

        let (file_type, extension) = classify(name);
        let record = CreateFile {
            name: name.to_string(),
            size: blob.size,
            extension,
            file_type,
            url: self.blobs.view_url(&blob.id),
            owner: ctx.user_id().to_string(),
            account_id: ctx.account_id().to_string(),
            users: Vec::new(),
            bucket_file_id: blob.id.clone(),
        };

        let file_id = Uuid::new_v4().simple().to_string();
        match self.records.create(&file_id, &record).await {
            Ok(file) => Ok(file),
            Err(e) => {
                self.discard_blob(&blob.id).await;
                Err(e)
            }
        }
    }

    async fn discard_blob(&self, blob_id: &str) {
        if let Err(e) = self.blobs.delete_blob(blob_id).await {
            error!(blob_id = %blob_id, error = %e, "Failed to delete blob, it is now orphaned");
        }
    }

    fn publish_uploaded(&self, ctx: &RequestContext, file: &File, path: String) {
        self.events.publish(DomainEvent::new(
            Some(ctx.user_id().to_string()),
            vec![file.owner.clone()],
            EventPayload::File(FileEvent::Uploaded {
                file_id: file.id.clone(),
                name: file.name.clone(),
                size: file.size,
                path,
            }),
        ));
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
