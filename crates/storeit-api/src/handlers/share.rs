//! Sharing handlers.

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use storeit_entity::file::File;

use crate::dto::request::{GrantAccessRequest, RevokeAccessRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/{id}/users
pub async fn grant_access(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<String>,
    Json(req): Json<GrantAccessRequest>,
) -> ApiResult<Json<ApiResponse<File>>> {
    req.validate()?;
    let file = state
        .share_service
        .grant_access(&auth, &file_id, &req.emails, &req.path)
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files/{id}/users
pub async fn revoke_access(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<String>,
    Json(req): Json<RevokeAccessRequest>,
) -> ApiResult<Json<ApiResponse<File>>> {
    req.validate()?;
    let file = state
        .share_service
        .revoke_access(&auth, &file_id, &req.email, &req.path)
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}
