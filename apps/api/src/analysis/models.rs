use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Sub-scores reported by the model, each in [0, 100] once clamped.
/// `overall` is the model's own opinion and is kept apart from the locally
/// computed match percentage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisScores {
    #[serde(default)]
    pub education: f64,
    #[serde(default)]
    pub skills: f64,
    #[serde(default)]
    pub experience: f64,
    #[serde(default)]
    pub tools: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<f64>,
}

impl AnalysisScores {
    /// Pulls every score into [0, 100]. Non-finite values become 0.
    pub fn clamped(self) -> Self {
        Self {
            education: clamp_score(self.education),
            skills: clamp_score(self.skills),
            experience: clamp_score(self.experience),
            tools: clamp_score(self.tools),
            overall: self.overall.map(clamp_score),
        }
    }
}

fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(MIN_SCORE, MAX_SCORE)
    } else {
        MIN_SCORE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisDetails {
    pub education_match: Vec<String>,
    pub skills_match: Vec<String>,
    pub skills_missing: Vec<String>,
    pub tools_match: Vec<String>,
    pub tools_missing: Vec<String>,
    pub experience_relevance: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// The structured payload the model is asked to return. `scores` is the only
/// mandatory key; an answer without it is treated as malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAnalysis {
    pub scores: AnalysisScores,
    #[serde(default)]
    pub analysis_details: AnalysisDetails,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

/// Where the analysis in a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Model,
    Fallback,
}

/// Analysis section of a record: the model payload plus the local aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub scores: AnalysisScores,
    pub analysis_details: AnalysisDetails,
    pub recommendations: Vec<String>,
    pub reasoning: String,
    pub match_percentage: f64,
    pub source: AnalysisSource,
}

/// Per-request result. Built once when the pipeline finishes; never stored.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord {
    pub analysis_id: Uuid,
    pub filename: String,
    pub file_size: usize,
    /// Length of the full extracted text, in characters.
    pub extracted_text_length: usize,
    /// First 500 characters of the extracted text, "..." appended if cut.
    pub extracted_text: String,
    pub analysis: AnalysisResult,
    pub processing_time_ms: u64,
    pub analyzed_at: DateTime<Utc>,
}
