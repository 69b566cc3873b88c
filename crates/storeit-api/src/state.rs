//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use storeit_auth::SessionResolver;
use storeit_core::config::AppConfig;
use storeit_provider::Backend;
use storeit_service::{
    DashboardService, EventBus, FileManager, ListingService, QuotaService, Services,
    ShareService, UploadService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Provider backend (blob store, document store, accounts)
    pub backend: Backend,
    /// Revalidation event bus
    pub events: EventBus,

    // ── Auth ─────────────────────────────────────────────────
    /// Session cookie to user resolver
    pub session_resolver: Arc<SessionResolver>,
    /// Sign-up, sign-in and sign-out flows
    pub user_service: Arc<UserService>,

    // ── Services ─────────────────────────────────────────────
    /// Upload orchestrator
    pub upload_service: Arc<UploadService>,
    /// File listing
    pub listing_service: Arc<ListingService>,
    /// Rename and delete
    pub file_manager: Arc<FileManager>,
    /// Sharing lists
    pub share_service: Arc<ShareService>,
    /// Usage snapshots
    pub quota_service: Arc<QuotaService>,
    /// Dashboard aggregation
    pub dashboard_service: Arc<DashboardService>,
}

impl AppState {
    /// Wires every service over `backend`.
    pub fn new(config: AppConfig, backend: Backend) -> Self {
        let services = Services::new(&backend, &config);
        Self {
            config: Arc::new(config),
            backend,
            events: services.events,
            session_resolver: services.resolver,
            user_service: services.users,
            upload_service: services.uploads,
            listing_service: services.listing,
            file_manager: services.files,
            share_service: services.shares,
            quota_service: services.quota,
            dashboard_service: services.dashboard,
        }
    }
}
