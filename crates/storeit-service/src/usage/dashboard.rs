//! Dashboard aggregation: usage summary plus recent files.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use storeit_core::error::AppError;
use storeit_entity::usage::{SpaceUsage, UsageSummary};

use super::quota::QuotaService;
use crate::context::RequestContext;
use crate::file::{FileList, ListFilesQuery, ListingService};

/// Number of recent files shown on the dashboard.
pub const RECENT_FILES: u32 = 10;

/// Everything the dashboard page renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Raw per-bucket usage.
    pub usage: SpaceUsage,
    /// Category breakdown and totals.
    pub summary: UsageSummary,
    /// Most recently updated files.
    pub recent_files: FileList,
}

/// Loads usage and recent files concurrently.
#[derive(Debug, Clone)]
pub struct DashboardService {
    quota: Arc<QuotaService>,
    listing: Arc<ListingService>,
}

impl DashboardService {
    /// Creates a dashboard service.
    pub fn new(quota: Arc<QuotaService>, listing: Arc<ListingService>) -> Self {
        Self { quota, listing }
    }

    /// Builds the dashboard for the current user.
    pub async fn dashboard(&self, ctx: &RequestContext) -> Result<Dashboard, AppError> {
        let recent = ListFilesQuery {
            sort: Some("$updatedAt-desc".to_string()),
            limit: Some(RECENT_FILES),
            ..Default::default()
        };

        let (usage, recent_files) = tokio::join!(
            self.quota.compute_used_space(ctx),
            self.listing.list_files(ctx, recent),
        );
        let usage = usage?;
        let recent_files = recent_files?;

        Ok(Dashboard {
            summary: UsageSummary::new(&usage, self.quota.ceiling()),
            usage,
            recent_files,
        })
    }
}
