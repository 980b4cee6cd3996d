use std::sync::Arc;

use crate::analysis::pipeline::ResumeAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the job description and the optional AI client; immutable after startup.
    pub analyzer: Arc<ResumeAnalyzer>,
    pub config: Config,
}
