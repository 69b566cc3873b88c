//! File handlers: list, category list, upload, rename, delete.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use bytes::Bytes;
use validator::Validate;

use storeit_core::error::AppError;
use storeit_entity::file::{Category, File};
use storeit_service::file::{DeleteRequest, FileList, RenameRequest, UploadRequest};

use crate::dto::request::{DeleteFileParams, ListFilesParams, RenameFileRequest};
use crate::dto::response::{ApiResponse, DeleteResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListFilesParams>,
) -> ApiResult<Json<ApiResponse<FileList>>> {
    params.validate()?;
    let list = state
        .listing_service
        .list_files(&auth, params.into_query()?)
        .await?;
    Ok(Json(ApiResponse::ok(list)))
}

/// GET /api/files/category/{category}
pub async fn list_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category): Path<String>,
    Query(params): Query<ListFilesParams>,
) -> ApiResult<Json<ApiResponse<FileList>>> {
    params.validate()?;
    let category: Category = category.parse()?;
    let list = state
        .listing_service
        .list_category(&auth, category, params.into_query()?)
        .await?;
    Ok(Json(ApiResponse::ok(list)))
}

/// POST /api/files/upload (multipart: `file`, optional `path`)
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<File>>> {
    let mut upload: Option<(String, Option<String>, Bytes)> = None;
    let mut path = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                let name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file: {e}")))?;
                upload = Some((name, content_type, data));
            }
            "path" => {
                path = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read path: {e}")))?;
            }
            _ => {}
        }
    }

    let (name, content_type, data) =
        upload.ok_or_else(|| AppError::validation("No file provided"))?;

    let file = state
        .upload_service
        .upload(
            &auth,
            UploadRequest {
                name,
                content_type,
                data,
                path,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(file)))
}

/// PATCH /api/files/{id}/name
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<String>,
    Json(req): Json<RenameFileRequest>,
) -> ApiResult<Json<ApiResponse<File>>> {
    req.validate()?;
    let file = state
        .file_manager
        .rename(
            &auth,
            RenameRequest {
                file_id,
                name: req.name,
                extension: req.extension,
                path: req.path,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<String>,
    Query(params): Query<DeleteFileParams>,
) -> ApiResult<Json<ApiResponse<DeleteResponse>>> {
    let outcome = state
        .file_manager
        .delete(
            &auth,
            DeleteRequest {
                file_id,
                bucket_file_id: params.bucket_file_id,
                owner_email: params.owner_email,
                path: params.path,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(DeleteResponse { outcome })))
}
