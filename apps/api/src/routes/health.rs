use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::llm_client::MODEL;
use crate::state::AppState;

const SERVICE: &str = "resume-match-api";

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": SERVICE
    }))
}

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "app": "Resume Analysis System",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "database": "none",
        "features": ["PDF processing", "AI analysis", "Real-time scoring"]
    }))
}

/// GET /api/v1/status
/// Diagnostic payload: whether AI analysis is live or fallback-only.
pub async fn status_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "ai_available": state.analyzer.ai_available(),
        "model": MODEL,
        "endpoints": {
            "POST /api/v1/analyze": "Upload and analyze a resume PDF",
            "GET /job-description": "Get job requirements",
            "GET /health": "Health check"
        }
    }))
}
