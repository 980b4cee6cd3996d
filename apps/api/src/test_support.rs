//! Shared fixtures for unit tests: generated PDFs, multipart bodies and a
//! scripted `TextGenerator`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LlmError, TextGenerator};

pub const BOUNDARY: &str = "resume-match-test-boundary";

/// Builds a valid single-font PDF with one page per entry. Each entry is
/// drawn as one line of Helvetica text; an empty entry produces a page with
/// no text operators.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    // 1 = catalog, 2 = page tree, 3 = font, then (page, contents) pairs.
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + i * 2).collect();
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    for (page_id, text) in page_ids.iter().zip(pages) {
        let content = if text.is_empty() {
            String::new()
        } else {
            format!("BT\n/F1 12 Tf\n72 720 Td\n({}) Tj\nET", escape_pdf_string(text))
        };
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            page_id + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}

fn escape_pdf_string(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// A `multipart/form-data` body with a single part named `field`.
pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/pdf\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Replays a fixed script of responses, one per call. Once the script runs
/// out every further call fails with `EmptyContent`.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: AtomicU32,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicU32::new(0),
        }
    }

    /// Answers every call with the same text.
    pub fn always(text: &str) -> Self {
        Self::new((0..16).map(|_| Ok(text.to_string())).collect())
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// A well-formed model answer with the given sub-scores.
pub fn model_response(education: u32, skills: u32, experience: u32, tools: u32) -> String {
    serde_json::json!({
        "scores": {
            "education": education,
            "skills": skills,
            "experience": experience,
            "tools": tools,
            "overall": 70
        },
        "analysis_details": {
            "education_match": [],
            "skills_match": ["Python", "SQL"],
            "skills_missing": ["Machine Learning"],
            "tools_match": ["Git"],
            "tools_missing": ["Pandas"],
            "experience_relevance": "Coursework only",
            "strengths": ["Solid Python basics"],
            "weaknesses": ["No production experience"]
        },
        "recommendations": ["Build an end-to-end ML project"],
        "reasoning": "Skills and tools align; education and experience are not evidenced."
    })
    .to_string()
}
