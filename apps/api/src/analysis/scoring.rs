use crate::analysis::models::AnalysisScores;

/// Policy weights for the match percentage. They sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub education: f64,
    pub skills: f64,
    pub experience: f64,
    pub tools: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            education: 0.25,
            skills: 0.30,
            experience: 0.25,
            tools: 0.20,
        }
    }
}

/// match% = 0.25*education + 0.30*skills + 0.25*experience + 0.20*tools,
/// rounded to two decimals. Ignores the model's own `overall` score.
pub fn compute_match_percentage(scores: &AnalysisScores, weights: &ScoreWeights) -> f64 {
    round_to_cents(
        weights.education * scores.education
            + weights.skills * scores.skills
            + weights.experience * scores.experience
            + weights.tools * scores.tools,
    )
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
