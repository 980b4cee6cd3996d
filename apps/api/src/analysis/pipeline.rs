//! Resume Analysis: orchestrates the full analysis pipeline.
//!
//! Flow: validate upload → extract text → build prompt → generate with
//!       retry → normalize → aggregate → assemble record.
//!
//! Asymmetric failure policy: a bad upload or an unreadable PDF aborts the
//! request, while every AI-stage failure degrades to the default analysis.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::extractor::extract_text_blocking;
use crate::analysis::job::JobDescription;
use crate::analysis::models::{AnalysisRecord, AnalysisResult};
use crate::analysis::normalizer::normalize;
use crate::analysis::prompts::{analysis_system, build_analysis_prompt, truncate_chars};
use crate::analysis::scoring::{compute_match_percentage, ScoreWeights};
use crate::errors::AppError;
use crate::llm_client::retry::{generate_with_retry, GenerationOutcome, RetryPolicy};
use crate::llm_client::TextGenerator;

/// Characters of extracted text echoed back in the record.
pub const PREVIEW_CHARS: usize = 500;

/// Long-lived, immutable analyzer shared by all requests.
///
/// `generator` is `None` when no AI credential is configured; the analyzer
/// then never touches the network and always returns the default analysis.
pub struct ResumeAnalyzer {
    job: Arc<JobDescription>,
    generator: Option<Arc<dyn TextGenerator>>,
    retry: RetryPolicy,
    weights: ScoreWeights,
}

impl ResumeAnalyzer {
    pub fn new(job: Arc<JobDescription>, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            job,
            generator,
            retry: RetryPolicy::default(),
            weights: ScoreWeights::default(),
        }
    }

    pub fn job(&self) -> &JobDescription {
        &self.job
    }

    pub fn ai_available(&self) -> bool {
        self.generator.is_some()
    }

    /// Runs the whole pipeline for one upload.
    ///
    /// Errors only for invalid input or failed extraction.
    pub async fn analyze(&self, bytes: Bytes, filename: &str) -> Result<AnalysisRecord, AppError> {
        let started = Instant::now();

        validate_upload(filename, &bytes)?;
        let file_size = bytes.len();

        info!("Processing file: {filename} ({file_size} bytes)");
        let text = extract_text_blocking(bytes).await?;
        if text.is_empty() {
            return Err(AppError::ExtractionFailed(
                "No text found in PDF".to_string(),
            ));
        }

        let prompt = build_analysis_prompt(&text, &self.job);
        let outcome = self.run_model(&prompt).await;
        let (analysis, source) = normalize(&outcome);

        let match_percentage = compute_match_percentage(&analysis.scores, &self.weights);
        let processing_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            "Analyzed {filename}: match={match_percentage:.2}% source={source:?} in {processing_time_ms}ms"
        );

        Ok(AnalysisRecord {
            analysis_id: Uuid::new_v4(),
            filename: filename.to_string(),
            file_size,
            extracted_text_length: text.chars().count(),
            extracted_text: preview(&text),
            analysis: AnalysisResult {
                scores: analysis.scores,
                analysis_details: analysis.analysis_details,
                recommendations: analysis.recommendations,
                reasoning: analysis.reasoning,
                match_percentage,
                source,
            },
            processing_time_ms,
            analyzed_at: Utc::now(),
        })
    }

    async fn run_model(&self, prompt: &str) -> GenerationOutcome {
        match &self.generator {
            Some(generator) => {
                info!("Analyzing resume with AI...");
                generate_with_retry(generator.as_ref(), prompt, &analysis_system(), &self.retry)
                    .await
            }
            None => {
                warn!("No AI credential configured, returning default analysis");
                GenerationOutcome::Unavailable
            }
        }
    }
}

/// Rejects uploads before any parsing happens. Emptiness is checked first so
/// an empty body is always reported as such, whatever its name.
pub fn validate_upload(filename: &str, bytes: &[u8]) -> Result<(), AppError> {
    if bytes.is_empty() {
        return Err(AppError::InvalidInput("Uploaded file is empty".to_string()));
    }
    if !filename.to_ascii_lowercase().ends_with(".pdf") {
        return Err(AppError::InvalidInput(
            "Only PDF files are accepted".to_string(),
        ));
    }
    Ok(())
}

fn preview(text: &str) -> String {
    let head = truncate_chars(text, PREVIEW_CHARS);
    if head.len() < text.len() {
        format!("{head}...")
    } else {
        head.to_string()
    }
}
