//! Route definitions for the StoreIt HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room left for multipart boundaries and the `path` field.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .storage
        .max_file_size_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(file_routes())
        .merge(usage_routes())
        .merge(event_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Sign-up, OTP, password, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", post(handlers::auth::sign_up))
        .route("/auth/sign-in", post(handlers::auth::sign_in))
        .route("/auth/verify", post(handlers::auth::verify))
        .route("/auth/password", post(handlers::auth::password))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Listing, upload, metadata, rename, delete, sharing
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route(
            "/files/category/{category}",
            get(handlers::file::list_category),
        )
        .route("/files/upload", post(handlers::file::upload_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
        .route("/files/{id}/name", patch(handlers::file::rename_file))
        .route(
            "/files/{id}/users",
            post(handlers::share::grant_access).delete(handlers::share::revoke_access),
        )
        .route("/store-metadata", post(handlers::metadata::store_metadata))
}

/// Quota and dashboard
fn usage_routes() -> Router<AppState> {
    Router::new()
        .route("/usage", get(handlers::usage::usage))
        .route("/dashboard", get(handlers::usage::dashboard))
}

/// Server-sent revalidation events
fn event_routes() -> Router<AppState> {
    Router::new().route("/events", get(handlers::events::events))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
