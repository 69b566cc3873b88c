//! Quota snapshot computed from the files a user can see.

use std::sync::Arc;

use tracing::debug;

use storeit_core::error::AppError;
use storeit_core::types::Query;
use storeit_entity::usage::{SpaceUsage, UsageRow};
use storeit_entity::user::User;

use crate::context::RequestContext;
use crate::file::FileRecords;

/// Computes [`SpaceUsage`] on demand. Nothing is cached.
#[derive(Debug, Clone)]
pub struct QuotaService {
    records: Arc<FileRecords>,
    /// Explicit page size so the provider default cannot truncate the scan.
    list_limit: u32,
    /// Storage ceiling in bytes.
    max_quota_bytes: u64,
}

impl QuotaService {
    /// Creates a quota service.
    pub fn new(records: Arc<FileRecords>, list_limit: u32, max_quota_bytes: u64) -> Self {
        Self {
            records,
            list_limit,
            max_quota_bytes,
        }
    }

    /// Storage ceiling in bytes.
    pub fn ceiling(&self) -> u64 {
        self.max_quota_bytes
    }

    /// Usage of the current user.
    pub async fn compute_used_space(&self, ctx: &RequestContext) -> Result<SpaceUsage, AppError> {
        self.usage_of(&ctx.user).await
    }

    /// Usage over every file owned by or shared with `user`. Pages through
    /// the scope until the provider's total is reached; a short read fails
    /// instead of producing a partial snapshot.
    pub async fn usage_of(&self, user: &User) -> Result<SpaceUsage, AppError> {
        let mut rows: Vec<UsageRow> = Vec::new();
        loop {
            let offset = u32::try_from(rows.len())
                .map_err(|_| AppError::internal("Usage scan exceeded the offset range"))?;
            let (total, page): (u64, Vec<UsageRow>) = self
                .records
                .list_as(&[
                    FileRecords::scope(user),
                    Query::select(["type", "size", "$updatedAt"]),
                    Query::order_asc("$id"),
                    Query::limit(self.list_limit),
                    Query::offset(offset),
                ])
                .await?;

            let fetched = page.len();
            rows.extend(page);
            if rows.len() as u64 >= total {
                break;
            }
            if fetched == 0 {
                return Err(AppError::provider(format!(
                    "Usage scan read {} of {} files",
                    rows.len(),
                    total
                )));
            }
        }

        let count = rows.len();
        let usage = SpaceUsage::from_rows(rows);
        debug!(user_id = %user.id, files = count, used = usage.total(), "Computed space usage");
        Ok(usage)
    }
}
