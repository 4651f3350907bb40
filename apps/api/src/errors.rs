use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::collection::CollectionError;
use crate::session::SessionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CollectionError> for AppError {
    fn from(err: CollectionError) -> Self {
        match err {
            CollectionError::CapacityExceeded { .. } => AppError::CapacityExceeded(err.to_string()),
            CollectionError::InvalidPosition { .. } => AppError::Validation(err.to_string()),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Collection(e) => e.into(),
            SessionError::InvalidArgument(msg) => AppError::Validation(msg),
            SessionError::SourceUnavailable(msg) => AppError::SourceUnavailable(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::CapacityExceeded(msg) => {
                (StatusCode::CONFLICT, "CAPACITY_EXCEEDED", msg.clone())
            }
            AppError::SourceUnavailable(msg) => {
                tracing::warn!("Source unavailable: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "SOURCE_UNAVAILABLE",
                    msg.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("job 9".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::CapacityExceeded("full".into()), StatusCode::CONFLICT),
            (
                AppError::SourceUnavailable("gone".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_collection_errors_map_to_app_errors() {
        let full: AppError = CollectionError::CapacityExceeded { capacity: 2 }.into();
        assert!(matches!(full, AppError::CapacityExceeded(_)));

        let position: AppError = SessionError::Collection(CollectionError::InvalidPosition {
            position: 4,
            size: 1,
        })
        .into();
        assert!(matches!(position, AppError::Validation(_)));
    }
}
