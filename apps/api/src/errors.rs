use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::source::SourceError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Data-shape problems in a resume are never errors here: the pipeline repairs
/// them. Only failing to obtain a document at all reaches this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Resume source error: {0}")]
    Source(#[from] SourceError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Source(SourceError::NotFound(location)) => {
                tracing::warn!("Resume not found: {location}");
                (
                    StatusCode::NOT_FOUND,
                    "RESUME_NOT_FOUND",
                    "No resume document could be found".to_string(),
                )
            }
            AppError::Source(e) => {
                tracing::error!("Resume source error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SOURCE_ERROR",
                    "The resume document could not be loaded".to_string(),
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
