//! Rename and delete (or leave) a file.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use storeit_core::error::AppError;
use storeit_core::events::{DomainEvent, EventPayload, FileEvent};
use storeit_core::traits::BlobStore;
use storeit_entity::file::File;

use super::records::FileRecords;
use crate::context::RequestContext;
use crate::events::{EventBus, file_audience};
use crate::share::ShareService;
use crate::validation::validate_file_name;

/// Rename parameters.
#[derive(Debug, Clone)]
pub struct RenameRequest {
    /// File document id.
    pub file_id: String,
    /// New name without extension.
    pub name: String,
    /// Extension to append.
    pub extension: String,
    /// Page to revalidate.
    pub path: String,
}

/// Delete parameters.
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    /// File document id.
    pub file_id: String,
    /// Blob id the caller believes backs the file.
    pub bucket_file_id: String,
    /// Owner email as shown to the caller; informational.
    pub owner_email: Option<String>,
    /// Page to revalidate.
    pub path: String,
}

/// What a delete request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteOutcome {
    /// The owner removed the document and its blob.
    Deleted,
    /// A shared user removed themselves from the sharing list.
    Left,
}

/// Applies name changes and deletions.
#[derive(Debug, Clone)]
pub struct FileManager {
    records: Arc<FileRecords>,
    blobs: Arc<dyn BlobStore>,
    shares: Arc<ShareService>,
    events: EventBus,
}

impl FileManager {
    /// Creates a file manager.
    pub fn new(
        records: Arc<FileRecords>,
        blobs: Arc<dyn BlobStore>,
        shares: Arc<ShareService>,
        events: EventBus,
    ) -> Self {
        Self {
            records,
            blobs,
            shares,
            events,
        }
    }

    /// Sets `name = base + "." + extension`. The blob is untouched.
    pub async fn rename(&self, ctx: &RequestContext, req: RenameRequest) -> Result<File, AppError> {
        let base = req.name.trim();
        let extension = req.extension.trim().trim_start_matches('.');
        let name = if extension.is_empty() {
            base.to_string()
        } else {
            format!("{base}.{extension}")
        };
        validate_file_name(base)?;
        validate_file_name(&name)?;

        let file = self.records.get(&req.file_id).await?;
        if !file.is_visible_to(ctx.user_id(), ctx.email()) {
            return Err(AppError::authorization("You do not have access to this file"));
        }

        let renamed = self.records.set_name(&file.id, &name).await?;
        info!(
            user_id = %ctx.user_id(),
            file_id = %renamed.id,
            from = %file.name,
            to = %renamed.name,
            "File renamed"
        );

        self.events.publish(DomainEvent::new(
            Some(ctx.user_id().to_string()),
            file_audience(&renamed),
            EventPayload::File(FileEvent::Renamed {
                file_id: renamed.id.clone(),
                name: renamed.name.clone(),
                path: req.path,
            }),
        ));
        Ok(renamed)
    }

    /// Deletes the file for its owner, or removes a shared user from it.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        req: DeleteRequest,
    ) -> Result<DeleteOutcome, AppError> {
        let file = self.records.get(&req.file_id).await?;

        if file.is_owned_by(ctx.user_id()) {
            if let Some(claimed) = req
                .owner_email
                .as_deref()
                .filter(|claimed| !claimed.eq_ignore_ascii_case(ctx.email()))
            {
                warn!(file_id = %file.id, claimed = %claimed, "Owner email does not match the session user");
            }
            if !req.bucket_file_id.is_empty() && req.bucket_file_id != file.bucket_file_id {
                return Err(AppError::validation(
                    "bucketFileId does not match the stored file",
                ));
            }

            self.records.delete(&file.id).await?;
            if let Err(e) = self.blobs.delete_blob(&file.bucket_file_id).await {
                error!(
                    file_id = %file.id,
                    blob_id = %file.bucket_file_id,
                    error = %e,
                    "Document deleted but blob removal failed, blob is orphaned"
                );
            }

            info!(user_id = %ctx.user_id(), file_id = %file.id, "File deleted");
            self.events.publish(DomainEvent::new(
                Some(ctx.user_id().to_string()),
                file_audience(&file),
                EventPayload::File(FileEvent::Deleted {
                    file_id: file.id.clone(),
                    name: file.name.clone(),
                    path: req.path,
                }),
            ));
            return Ok(DeleteOutcome::Deleted);
        }

        if file.is_shared_with(ctx.email()) {
            self.shares.leave(ctx, &file.id, &req.path).await?;
            return Ok(DeleteOutcome::Left);
        }

        Err(AppError::authorization("You do not have access to this file"))
    }
}
