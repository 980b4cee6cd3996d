mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::job::JobDescription;
use crate::analysis::pipeline::ResumeAnalyzer;
use crate::config::Config;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the AI client; without a key the analyzer runs fallback-only
    let generator: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
        Some(key) => {
            let client =
                GeminiClient::new(key.clone(), Duration::from_secs(config.ai_timeout_secs))?;
            info!(
                "Gemini client initialized (model: {}, timeout: {}s)",
                llm_client::MODEL,
                config.ai_timeout_secs
            );
            Some(Arc::new(client) as Arc<dyn TextGenerator>)
        }
        None => {
            warn!("GEMINI_API_KEY not set. Every request will receive the default analysis.");
            None
        }
    };

    let job = Arc::new(JobDescription::ai_data_intern());
    info!("Scoring resumes against: {}", job.position);

    let state = AppState {
        analyzer: Arc::new(ResumeAnalyzer::new(job, generator)),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
