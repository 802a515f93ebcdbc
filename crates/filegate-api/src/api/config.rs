/// Config endpoint
use axum::{Json, extract::State};
use filegate_core::constants::{MAX_EXTENSION_LENGTH, MAX_FILENAME_LENGTH};
use filegate_core::models::StorageBackend;
use serde::Serialize;
use std::sync::Arc;

use crate::{api::ApiResponse, context::ApiContext, error::ApiError};

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub version: String,
    #[serde(rename = "storageBackend")]
    pub storage_backend: StorageBackend,
    pub uploads: UploadLimits,
    pub extensions: ExtensionLimits,
}

#[derive(Debug, Serialize)]
pub struct UploadLimits {
    #[serde(rename = "maxSizeBytes")]
    pub max_size_bytes: usize,
    #[serde(rename = "maxFilenameLength")]
    pub max_filename_length: usize,
}

#[derive(Debug, Serialize)]
pub struct ExtensionLimits {
    #[serde(rename = "maxCustom")]
    pub max_custom: usize,
    #[serde(rename = "customCount")]
    pub custom_count: usize,
    #[serde(rename = "maxLength")]
    pub max_length: usize,
    /// Extensions currently refused, fixed and custom combined
    pub blocked: Vec<String>,
}

pub async fn get_config(
    State(ctx): State<Arc<ApiContext>>,
) -> Result<Json<ApiResponse<ConfigResponse>>, ApiError> {
    let snapshot = ctx.extensions.snapshot().await?;

    let config = ConfigResponse {
        version: filegate_core::VERSION.to_string(),
        storage_backend: ctx.config.storage_backend,
        uploads: UploadLimits {
            max_size_bytes: ctx.uploads.max_upload_size(),
            max_filename_length: MAX_FILENAME_LENGTH,
        },
        extensions: ExtensionLimits {
            max_custom: ctx.extensions.max_custom(),
            custom_count: ctx.extensions.custom_count().await?,
            max_length: MAX_EXTENSION_LENGTH,
            blocked: snapshot.blocked_extensions(),
        },
    };

    Ok(ApiResponse::ok("Configuration", config))
}
