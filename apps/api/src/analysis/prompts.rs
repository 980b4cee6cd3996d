// Prompt constants for resume analysis.
// Reuses the JSON-only fragment from llm_client::prompts.

use crate::analysis::job::JobDescription;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Resume text beyond this many characters is not sent to the model.
pub const MAX_RESUME_CHARS: usize = 3000;

/// Role preamble; `analysis_system()` appends the JSON-only rules.
const ANALYSIS_ROLE: &str = "You are an experienced technical recruiter \
    who scores resumes against a job description.";

/// Analysis prompt template.
/// Replace: {position}, {required_education}, {required_skills},
///          {preferred_skills}, {required_tools}, {preferred_tools},
///          {responsibilities}, {resume_text}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume for the position: {position}

JOB REQUIREMENTS:
- Required education: {required_education}
- Required skills: {required_skills}
- Preferred skills: {preferred_skills}
- Required tools: {required_tools}
- Preferred tools: {preferred_tools}
- Responsibilities: {responsibilities}

RESUME TEXT:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "scores": {
    "education": 0,
    "skills": 0,
    "experience": 0,
    "tools": 0,
    "overall": 0
  },
  "analysis_details": {
    "education_match": ["matched education fields"],
    "skills_match": ["matched skills"],
    "skills_missing": ["missing required skills"],
    "tools_match": ["matched tools"],
    "tools_missing": ["missing required tools"],
    "experience_relevance": "how relevant the candidate's experience is",
    "strengths": ["candidate strengths"],
    "weaknesses": ["areas to improve"]
  },
  "recommendations": ["concrete suggestions to improve the resume"],
  "reasoning": "detailed explanation of the scores"
}

SCORING RULES:
1. Every score is a number from 0 to 100 inclusive
2. Score each dimension on fit with THIS position only
3. List only skills and tools that appear in the requirements above
4. Base every statement on the resume text; do not invent experience"#;

pub fn analysis_system() -> String {
    format!("{ANALYSIS_ROLE} {JSON_ONLY_SYSTEM}")
}

/// Renders the analysis prompt. Pure function of its inputs.
pub fn build_analysis_prompt(resume_text: &str, job: &JobDescription) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{position}", &job.position)
        .replace("{required_education}", &job.required_education.join(", "))
        .replace("{required_skills}", &job.required_skills.join(", "))
        .replace("{preferred_skills}", &job.preferred_skills.join(", "))
        .replace("{required_tools}", &job.required_tools.join(", "))
        .replace("{preferred_tools}", &job.preferred_tools.join(", "))
        .replace("{responsibilities}", &job.responsibilities.join("; "))
        // Resume text goes last so placeholders inside it are left alone.
        .replace("{resume_text}", truncate_chars(resume_text, MAX_RESUME_CHARS))
}

/// Returns at most `max` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
