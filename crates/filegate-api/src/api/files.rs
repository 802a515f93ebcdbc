/// Stored file endpoints
use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartRejection},
};
use filegate_core::FilegateError;
use filegate_core::models::{StoredFile, UploadReceipt};
use std::sync::Arc;
use tracing::debug;

use crate::{api::ApiResponse, context::ApiContext, error::ApiError};

/// Multipart field carrying the file
const FILE_FIELD: &str = "file";

pub async fn list(
    State(ctx): State<Arc<ApiContext>>,
) -> Result<Json<ApiResponse<Vec<StoredFile>>>, ApiError> {
    let files = ctx.uploads.list_files().await?;
    Ok(ApiResponse::ok("Stored files", files))
}

/// Accepts a multipart form with a single `file` field
pub async fn upload(
    State(ctx): State<Arc<ApiContext>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<UploadReceipt>>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut file: Option<(Option<String>, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "Ignoring multipart field");
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let data = field.bytes().await?;
        file = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) = file.unwrap_or_default();
    let receipt = ctx
        .uploads
        .upload(filename.as_deref(), &data)
        .await
        .map_err(|e| match e {
            FilegateError::LimitExceeded(msg) => ApiError::PayloadTooLarge(msg),
            other => other.into(),
        })?;

    Ok(ApiResponse::ok("File uploaded", receipt))
}

pub async fn delete(
    State(ctx): State<Arc<ApiContext>>,
    Path(filename): Path<String>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    ctx.uploads.delete_file(&filename).await?;
    Ok(ApiResponse::ok("File deleted", filename))
}
