/// API endpoint modules
pub mod config;
pub mod extensions;
pub mod files;
pub mod health;

use axum::Json;
use serde::Serialize;

/// JSON envelope shared by every `/api` endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(rename = "errorCode", skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error_code: None,
        })
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>, code: &str) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error_code: Some(code.to_string()),
        }
    }
}
