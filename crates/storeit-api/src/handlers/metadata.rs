//! Metadata for blobs the client wrote to the bucket directly.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use storeit_entity::file::File;
use storeit_service::file::StoreMetadataRequest;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/store-metadata
///
/// Responds 201 with the created document. Missing fields are 400, an
/// upload past the ceiling is 403 and leaves no blob behind.
pub async fn store_metadata(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<StoreMetadataRequest>,
) -> ApiResult<(StatusCode, Json<File>)> {
    let file = state.upload_service.store_metadata(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(file)))
}
