//! PDF text extraction via `pdf-extract`. No OCR: a scanned PDF without a
//! text layer yields an empty string, which the analyzer rejects.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// Page separator emitted by `pdf-extract`.
const FORM_FEED: char = '\x0C';

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0}")]
    Parse(String),

    #[error("PDF parser crashed on this document")]
    Panicked,

    #[error("extraction task was cancelled")]
    Cancelled,
}

/// Extracts the text layer of an in-memory PDF. Pages are trimmed, empty
/// pages dropped, and the rest joined with newlines.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;

    let text = join_pages(&raw);
    debug!(
        "Extracted {} characters from {} byte PDF",
        text.chars().count(),
        bytes.len()
    );
    Ok(text)
}

/// Runs `extract_text` on the blocking pool. The parser is CPU bound and can
/// panic on hostile input; a panic becomes `ExtractionError::Panicked`.
pub async fn extract_text_blocking(bytes: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| {
            if e.is_panic() {
                ExtractionError::Panicked
            } else {
                ExtractionError::Cancelled
            }
        })?
}

fn join_pages(raw: &str) -> String {
    raw.split(FORM_FEED)
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
