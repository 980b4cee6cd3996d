//! Turns whatever the AI stage produced into a well-formed `ModelAnalysis`.
//!
//! Parsing is fallible; `normalize` is the recovery step that swaps in the
//! default analysis so the pipeline never fails because of the model.

use thiserror::Error;
use tracing::warn;

use crate::analysis::models::{AnalysisDetails, AnalysisScores, AnalysisSource, ModelAnalysis};
use crate::llm_client::retry::GenerationOutcome;

pub const FALLBACK_RECOMMENDATION: &str =
    "Unable to analyze the resume. Please check the file format and try again.";
pub const FALLBACK_REASONING: &str = "An error occurred during analysis.";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("response contains no JSON object")]
    MissingObject,

    #[error("response does not match the analysis schema: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses model text as a `ModelAnalysis`. Anything before the first `{` or
/// after the last `}` is ignored. Scores are clamped into [0, 100].
pub fn parse_model_analysis(text: &str) -> Result<ModelAnalysis, NormalizeError> {
    let start = text.find('{').ok_or(NormalizeError::MissingObject)?;
    let end = text.rfind('}').ok_or(NormalizeError::MissingObject)?;
    if end < start {
        return Err(NormalizeError::MissingObject);
    }

    let mut analysis: ModelAnalysis = serde_json::from_str(&text[start..=end])?;
    analysis.scores = analysis.scores.clamped();
    Ok(analysis)
}

/// All-zero analysis returned whenever the model gives nothing usable.
pub fn default_analysis() -> ModelAnalysis {
    ModelAnalysis {
        scores: AnalysisScores {
            overall: Some(0.0),
            ..AnalysisScores::default()
        },
        analysis_details: AnalysisDetails::default(),
        recommendations: vec![FALLBACK_RECOMMENDATION.to_string()],
        reasoning: FALLBACK_REASONING.to_string(),
    }
}

pub fn normalize(outcome: &GenerationOutcome) -> (ModelAnalysis, AnalysisSource) {
    match outcome {
        GenerationOutcome::Completed { text, attempts } => match parse_model_analysis(text) {
            Ok(analysis) => (analysis, AnalysisSource::Model),
            Err(e) => {
                warn!("Malformed AI response after {attempts} attempt(s), using default analysis: {e}");
                (default_analysis(), AnalysisSource::Fallback)
            }
        },
        GenerationOutcome::QuotaExhausted { attempts } => {
            warn!("AI quota exhausted after {attempts} attempt(s), using default analysis");
            (default_analysis(), AnalysisSource::Fallback)
        }
        GenerationOutcome::Exhausted {
            attempts,
            last_error,
        } => {
            warn!("AI unavailable after {attempts} attempt(s) ({last_error}), using default analysis");
            (default_analysis(), AnalysisSource::Fallback)
        }
        GenerationOutcome::Unavailable => (default_analysis(), AnalysisSource::Fallback),
    }
}
