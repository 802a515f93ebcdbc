/// API Error types
use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use filegate_core::FilegateError;
use tracing::error;

use crate::api::ApiResponse;

/// API Error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Upload refused by the validation pipeline
    #[error("{message}")]
    Rejected { code: &'static str, message: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Rejected { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::LimitExceeded(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Rejected { code, .. } => *code,
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::LimitExceeded(_) => "LIMIT_EXCEEDED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            ApiError::Rejected { message, .. } => message,
            // Internal details stay in the logs
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(ApiResponse::<()>::error(message, code));

        (status, body).into_response()
    }
}

/// Convert filegate-core errors to API errors
impl From<FilegateError> for ApiError {
    fn from(err: FilegateError) -> Self {
        match err {
            FilegateError::Rejected(rejection) => ApiError::Rejected {
                code: rejection.code(),
                message: rejection.to_string(),
            },
            FilegateError::Validation(msg) => ApiError::BadRequest(msg),
            FilegateError::Conflict(msg) => ApiError::Conflict(msg),
            FilegateError::LimitExceeded(msg) => ApiError::LimitExceeded(msg),
            FilegateError::NotFound(msg) => ApiError::NotFound(msg),
            other @ (FilegateError::Storage(_)
            | FilegateError::NamespaceExhausted(_)
            | FilegateError::Catalog(_)
            | FilegateError::Config(_)) => {
                error!(
                    error = %other,
                    retriable = other.is_retriable(),
                    "Request failed with internal error"
                );
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::BadRequest(err.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filegate_core::Rejection;

    #[test]
    fn test_rejection_maps_to_bad_request_with_code() {
        let err: ApiError = FilegateError::Rejected(Rejection::BlockedExtension {
            extension: "exe".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "BLOCKED_EXTENSION");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (FilegateError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (FilegateError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (FilegateError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                FilegateError::LimitExceeded("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                FilegateError::NamespaceExhausted("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                FilegateError::Storage("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }
}
