//! Wiring of every service over one provider backend.

use std::sync::Arc;

use storeit_auth::{Authenticator, SessionResolver, UserDirectory};
use storeit_core::config::AppConfig;
use storeit_provider::Backend;

use crate::events::EventBus;
use crate::file::{FileManager, FileRecords, ListingService, UploadService};
use crate::lock::KeyedMutex;
use crate::share::ShareService;
use crate::usage::{DashboardService, QuotaService};
use crate::user::UserService;

/// All services, constructed once at startup and shared by handlers.
#[derive(Debug, Clone)]
pub struct Services {
    /// Revalidation event bus.
    pub events: EventBus,
    /// Per-owner upload admission locks.
    pub upload_locks: KeyedMutex,
    /// Session cookie to user.
    pub resolver: Arc<SessionResolver>,
    /// Account flows.
    pub users: Arc<UserService>,
    /// Uploads and direct-upload metadata.
    pub uploads: Arc<UploadService>,
    /// Listing.
    pub listing: Arc<ListingService>,
    /// Rename and delete.
    pub files: Arc<FileManager>,
    /// Sharing lists.
    pub shares: Arc<ShareService>,
    /// Usage snapshots.
    pub quota: Arc<QuotaService>,
    /// Dashboard aggregation.
    pub dashboard: Arc<DashboardService>,
}

impl Services {
    /// Builds the service graph.
    pub fn new(backend: &Backend, config: &AppConfig) -> Self {
        let events = EventBus::new(config.server.event_buffer);
        let upload_locks = KeyedMutex::new();

        let directory = Arc::new(UserDirectory::new(
            backend.documents.clone(),
            config.provider.users_collection_id.clone(),
        ));
        let authenticator = Arc::new(Authenticator::new(backend.accounts.clone()));
        let resolver = Arc::new(SessionResolver::new(
            backend.accounts.clone(),
            directory.clone(),
        ));
        let users = Arc::new(UserService::new(
            directory,
            authenticator,
            KeyedMutex::new(),
            events.clone(),
            config.account.avatar_placeholder_url.clone(),
        ));

        let records = Arc::new(FileRecords::new(
            backend.documents.clone(),
            config.provider.files_collection_id.clone(),
        ));
        let quota = Arc::new(QuotaService::new(
            records.clone(),
            config.provider.list_limit,
            config.storage.max_quota_bytes,
        ));
        let uploads = Arc::new(UploadService::new(
            backend.blobs.clone(),
            records.clone(),
            quota.clone(),
            upload_locks.clone(),
            events.clone(),
            config.storage.clone(),
        ));
        let listing = Arc::new(ListingService::new(records.clone()));
        let shares = Arc::new(ShareService::new(records.clone(), events.clone()));
        let files = Arc::new(FileManager::new(
            records,
            backend.blobs.clone(),
            shares.clone(),
            events.clone(),
        ));
        let dashboard = Arc::new(DashboardService::new(quota.clone(), listing.clone()));

        Self {
            events,
            upload_locks,
            resolver,
            users,
            uploads,
            listing,
            files,
            shares,
            quota,
            dashboard,
        }
    }
}
