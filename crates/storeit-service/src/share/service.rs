//! Grant and revoke email access to a file.

use std::sync::Arc;

use tracing::info;

use storeit_core::error::AppError;
use storeit_core::events::{DomainEvent, EventPayload, FileEvent};
use storeit_entity::file::File;

use crate::context::RequestContext;
use crate::events::{EventBus, file_audience};
use crate::file::FileRecords;
use crate::validation::normalize_email;

/// Maintains the `users` list of a file.
///
/// Updates are read-modify-write without a version check, so two
/// concurrent changes to one file can lose an update.
#[derive(Debug, Clone)]
pub struct ShareService {
    records: Arc<FileRecords>,
    events: EventBus,
}

impl ShareService {
    /// Creates a share service.
    pub fn new(records: Arc<FileRecords>, events: EventBus) -> Self {
        Self { records, events }
    }

    /// Adds emails to the sharing list. Only the owner may share; emails
    /// already present are not duplicated.
    pub async fn grant_access(
        &self,
        ctx: &RequestContext,
        file_id: &str,
        emails: &[String],
        path: &str,
    ) -> Result<File, AppError> {
        let requested = emails
            .iter()
            .map(|email| normalize_email(email))
            .collect::<Result<Vec<_>, _>>()?;

        let file = self.records.get(file_id).await?;
        if !file.is_owned_by(ctx.user_id()) {
            return Err(AppError::authorization("Only the owner can share this file"));
        }

        let mut users = dedup_emails(file.users.iter().map(String::as_str));
        for email in requested {
            if !users.contains(&email) {
                users.push(email);
            }
        }

        let file = if users == file.users {
            file
        } else {
            self.records.set_users(file_id, &users).await?
        };

        info!(
            user_id = %ctx.user_id(),
            file_id = %file.id,
            shared_with = file.users.len(),
            "Access granted"
        );
        self.publish_sharing_changed(ctx, &file, &file_audience(&file), path);
        Ok(file)
    }

    /// Removes one email. The owner may remove anyone; a shared user may
    /// remove only themselves. An absent email is a no-op.
    pub async fn revoke_access(
        &self,
        ctx: &RequestContext,
        file_id: &str,
        email: &str,
        path: &str,
    ) -> Result<File, AppError> {
        let email = normalize_email(email)?;
        let file = self.records.get(file_id).await?;

        let removing_self = email.eq_ignore_ascii_case(ctx.email()) && file.is_shared_with(&email);
        if !file.is_owned_by(ctx.user_id()) && !removing_self {
            return Err(AppError::authorization(
                "Only the owner can change who this file is shared with",
            ));
        }

        if !file.is_shared_with(&email) {
            return Ok(file);
        }

        let audience = file_audience(&file);
        let users: Vec<String> = file
            .users
            .iter()
            .filter(|u| !u.eq_ignore_ascii_case(&email))
            .cloned()
            .collect();
        let updated = self.records.set_users(file_id, &users).await?;

        info!(user_id = %ctx.user_id(), file_id = %file.id, "Access revoked");
        if removing_self && !file.is_owned_by(ctx.user_id()) {
            self.events.publish(DomainEvent::new(
                Some(ctx.user_id().to_string()),
                audience,
                EventPayload::File(FileEvent::Left {
                    file_id: updated.id.clone(),
                    email,
                    path: path.to_string(),
                }),
            ));
        } else {
            self.publish_sharing_changed(ctx, &updated, &audience, path);
        }
        Ok(updated)
    }

    /// Removes the caller from a file shared with them.
    pub async fn leave(&self, ctx: &RequestContext, file_id: &str, path: &str) -> Result<File, AppError> {
        let email = ctx.email().to_string();
        self.revoke_access(ctx, file_id, &email, path).await
    }

    fn publish_sharing_changed(
        &self,
        ctx: &RequestContext,
        file: &File,
        audience: &[String],
        path: &str,
    ) {
        let mut audience = audience.to_vec();
        for email in &file.users {
            if !audience.contains(email) {
                audience.push(email.clone());
            }
        }
        self.events.publish(DomainEvent::new(
            Some(ctx.user_id().to_string()),
            audience,
            EventPayload::File(FileEvent::SharingChanged {
                file_id: file.id.clone(),
                users: file.users.clone(),
                path: path.to_string(),
            }),
        ));
    }
}

fn dedup_emails<'a>(emails: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for email in emails {
        let email = email.trim().to_lowercase();
        if !email.is_empty() && !out.contains(&email) {
            out.push(email);
        }
    }
    out
}
