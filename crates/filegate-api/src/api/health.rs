/// Health check endpoint
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::context::ApiContext;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub storage: String,
    pub catalog: String,
}

/// Health check handler
pub async fn handler(
    State(ctx): State<Arc<ApiContext>>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let mut all_healthy = true;

    let storage_status = match ctx.storage.ensure_ready().await {
        Ok(()) => "ok".to_string(),
        Err(e) => {
            error!("Storage health check failed: {}", e);
            all_healthy = false;
            "error".to_string()
        }
    };

    let catalog_status = match ctx.extensions.list_fixed().await {
        Ok(fixed) if !fixed.is_empty() => "ok".to_string(),
        Ok(_) => {
            error!("Catalog health check failed: fixed catalog is empty");
            all_healthy = false;
            "empty".to_string()
        }
        Err(e) => {
            error!("Catalog health check failed: {}", e);
            all_healthy = false;
            "error".to_string()
        }
    };

    let response = HealthResponse {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks: HealthChecks {
            storage: storage_status,
            catalog: catalog_status,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
