// Resume analysis: text extraction, prompt building, model call handling,
// normalization and score aggregation.
// All model calls go through llm_client; no direct Gemini calls here.

pub mod extractor;
pub mod handlers;
pub mod job;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod scoring;
