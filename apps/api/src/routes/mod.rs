pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::analysis::handlers;
use crate::state::AppState;

/// Envelope shared by every analysis endpoint: `{success, data?, code?, error?}`.
/// `AppError` renders its failures through `ApiResponse::failure`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            code: None,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(code: &'static str, error: String) -> Self {
        Self {
            success: false,
            data: None,
            code: Some(code),
            error: Some(error),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/job-description", get(handlers::handle_job_description))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/analyze", post(handlers::handle_analyze))
        .route("/api/v1/status", get(health::status_handler))
        .layer(body_limit)
        .with_state(state)
}
