//! # storeit-api
//!
//! HTTP API layer for StoreIt built on Axum.
//!
//! Provides the REST endpoints, the server-sent revalidation stream,
//! middleware (CORS, logging), the session cookie extractor, DTOs, and
//! error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
