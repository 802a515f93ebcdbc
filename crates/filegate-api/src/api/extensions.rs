/// Extension catalog endpoints
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use filegate_core::models::{CustomExtension, ExtensionRequest, FixedExtension};
use serde::Deserialize;
use std::sync::Arc;

use crate::{api::ApiResponse, context::ApiContext, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(rename = "isBlocked")]
    pub is_blocked: bool,
}

pub async fn list_fixed(
    State(ctx): State<Arc<ApiContext>>,
) -> Result<Json<ApiResponse<Vec<FixedExtension>>>, ApiError> {
    let fixed = ctx.extensions.list_fixed().await?;
    Ok(ApiResponse::ok("Fixed extensions", fixed))
}

pub async fn update_fixed_status(
    State(ctx): State<Arc<ApiContext>>,
    Path(id): Path<i64>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<FixedExtension>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let updated = ctx
        .extensions
        .update_fixed_status(id, query.is_blocked)
        .await?;
    Ok(ApiResponse::ok("Fixed extension updated", updated))
}

pub async fn list_custom(
    State(ctx): State<Arc<ApiContext>>,
) -> Result<Json<ApiResponse<Vec<CustomExtension>>>, ApiError> {
    let custom = ctx.extensions.list_custom().await?;
    Ok(ApiResponse::ok("Custom extensions", custom))
}

pub async fn add_custom(
    State(ctx): State<Arc<ApiContext>>,
    payload: Result<Json<ExtensionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CustomExtension>>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let entry = ctx.extensions.add_custom(&request.extension_name).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok("Custom extension added", entry),
    ))
}

pub async fn delete_custom(
    State(ctx): State<Arc<ApiContext>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<i64>>, ApiError> {
    ctx.extensions.delete_custom(id).await?;
    Ok(ApiResponse::ok("Custom extension deleted", id))
}
