//! Application builder: wires the provider backend, services and router.

use axum::Router;
use tracing::info;

use storeit_core::config::AppConfig;
use storeit_core::error::AppError;
use storeit_provider::Backend;

use crate::router::build_router;
use crate::state::AppState;

/// Selects the provider named by configuration and builds the state.
pub fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let backend = Backend::from_config(&config.provider)?;
    info!(
        max_quota_bytes = config.storage.max_quota_bytes,
        max_file_size_bytes = config.storage.max_file_size_bytes,
        "Storage ceilings"
    );
    Ok(AppState::new(config, backend))
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
