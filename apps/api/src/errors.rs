use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::analysis::extractor::ExtractionError;
use crate::routes::ApiResponse;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only request-fatal failures live here. AI-stage failures never reach this
/// type: the analyzer absorbs them into the fallback analysis.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    ExtractionFailed(String),

    #[error("Uploaded file exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        match e {
            // The worker was torn down, not the document's fault.
            ExtractionError::Cancelled => AppError::Internal(anyhow::Error::new(e)),
            other => {
                AppError::ExtractionFailed(format!("Failed to extract text from PDF: {other}"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::InvalidInput(msg) => {
                tracing::info!("Rejected upload: {msg}");
                (StatusCode::BAD_REQUEST, "INVALID_INPUT")
            }
            AppError::ExtractionFailed(msg) => {
                tracing::warn!("Extraction failed: {msg}");
                (StatusCode::BAD_REQUEST, "EXTRACTION_FAILED")
            }
            AppError::PayloadTooLarge { limit } => {
                tracing::info!("Rejected upload over {limit} bytes");
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        (status, Json(ApiResponse::failure(code, self.to_string()))).into_response()
    }
}
