//! Quota and dashboard handlers.

use axum::Json;
use axum::extract::State;

use storeit_entity::usage::UsageSummary;
use storeit_service::usage::Dashboard;

use crate::dto::response::{ApiResponse, UsageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/usage
pub async fn usage(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UsageResponse>>> {
    let usage = state.quota_service.compute_used_space(&auth).await?;
    let summary = UsageSummary::new(&usage, state.quota_service.ceiling());
    Ok(Json(ApiResponse::ok(UsageResponse { usage, summary })))
}

/// GET /api/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Dashboard>>> {
    let dashboard = state.dashboard_service.dashboard(&auth).await?;
    Ok(Json(ApiResponse::ok(dashboard)))
}
