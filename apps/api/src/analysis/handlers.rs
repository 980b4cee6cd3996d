//! Axum route handlers for the Analysis API.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::analysis::job::JobDescription;
use crate::analysis::models::AnalysisRecord;
use crate::errors::AppError;
use crate::routes::ApiResponse;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponseData {
    #[serde(flatten)]
    pub record: AnalysisRecord,
    pub job_description: JobDescription,
}

/// Body-limit hits surface as multipart read errors; report them as such.
fn multipart_error(e: MultipartError, limit: usize, context: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::InvalidInput(format!("{context}: {e}"))
    }
}

/// POST /api/v1/analyze
///
/// Multipart upload with the PDF in the `file` field.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<AnalyzeResponseData>>, AppError> {
    let limit = state.config.max_upload_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit, "Malformed multipart body"))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, limit, "Failed to read upload"))?;

        let record = state.analyzer.analyze(bytes, &filename).await?;

        return Ok(Json(ApiResponse::ok(AnalyzeResponseData {
            record,
            job_description: state.analyzer.job().clone(),
        })));
    }

    Err(AppError::InvalidInput(format!(
        "Missing '{FILE_FIELD}' field in multipart body"
    )))
}

/// GET /job-description
pub async fn handle_job_description(
    State(state): State<AppState>,
) -> Json<ApiResponse<JobDescription>> {
    Json(ApiResponse::ok(state.analyzer.job().clone()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::analysis::job::JobDescription;
    use crate::analysis::pipeline::ResumeAnalyzer;
    use crate::config::Config;
    use crate::llm_client::TextGenerator;
    use crate::routes::build_router;
    use crate::state::AppState;
    use crate::test_support::{
        model_response, multipart_body, pdf_with_pages, ScriptedGenerator, BOUNDARY,
    };

    fn test_config(max_upload_bytes: usize) -> Config {
        Config {
            gemini_api_key: None,
            port: 0,
            rust_log: "debug".to_string(),
            ai_timeout_secs: 5,
            max_upload_bytes,
        }
    }

    fn app_with_limit(generator: Option<Arc<dyn TextGenerator>>, max_upload_bytes: usize) -> Router {
        let analyzer = ResumeAnalyzer::new(Arc::new(JobDescription::ai_data_intern()), generator);
        build_router(AppState {
            analyzer: Arc::new(analyzer),
            config: test_config(max_upload_bytes),
        })
    }

    fn app(generator: Option<Arc<dyn TextGenerator>>) -> Router {
        app_with_limit(generator, 1024 * 1024)
    }

    fn upload(field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(field, filename, bytes)))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_analyze_returns_envelope_with_record_and_job() {
        let generator: Arc<dyn TextGenerator> =
            Arc::new(ScriptedGenerator::always(&model_response(80, 90, 40, 70)));
        let pdf = pdf_with_pages(&["Python, SQL, Git"]);

        let (status, body) = send(app(Some(generator)), upload("file", "cv.pdf", &pdf)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let data = &body["data"];
        assert_eq!(data["filename"], "cv.pdf");
        assert_eq!(data["file_size"], pdf.len());
        assert!(data["analysis_id"].is_string());
        assert_eq!(data["analysis"]["source"], "model");
        // 0.25*80 + 0.30*90 + 0.25*40 + 0.20*70
        assert_eq!(data["analysis"]["match_percentage"], 71.0);
        assert_eq!(data["analysis"]["scores"]["overall"], 70.0);
        assert_eq!(data["job_description"]["position"], "AI & Data Solution Intern");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_pdf_filename() {
        let (status, body) = send(app(None), upload("file", "cv.docx", b"%PDF-1.4")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Only PDF files are accepted");
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_upload() {
        let (status, body) = send(app(None), upload("file", "cv.pdf", b"")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Uploaded file is empty");
    }

    #[tokio::test]
    async fn test_analyze_requires_file_field() {
        let (status, body) = send(app(None), upload("resume", "cv.pdf", b"%PDF-1.4")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_analyze_reports_corrupt_pdf_as_bad_request() {
        let (status, body) = send(app(None), upload("file", "cv.pdf", b"%PDF-garbage")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_analyze_rejects_upload_over_limit() {
        let oversized = vec![b'%'; 4096];
        let (status, body) = send(
            app_with_limit(None, 1024),
            upload("file", "cv.pdf", &oversized),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(body["error"], "Uploaded file exceeds 1024 bytes");
    }

    #[tokio::test]
    async fn test_analyze_without_credential_returns_fallback() {
        let pdf = pdf_with_pages(&["Jane Doe", "Python developer"]);
        let (status, body) = send(app(None), upload("file", "cv.pdf", &pdf)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["analysis"]["source"], "fallback");
        assert_eq!(body["data"]["analysis"]["match_percentage"], 0.0);
    }

    #[tokio::test]
    async fn test_job_description_endpoint() {
        let request = Request::builder()
            .uri("/job-description")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app(None), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["required_tools"][4], "Git");
    }

    #[tokio::test]
    async fn test_status_reflects_credential() {
        let request = || {
            Request::builder()
                .uri("/api/v1/status")
                .body(Body::empty())
                .unwrap()
        };
        let generator: Arc<dyn TextGenerator> = Arc::new(ScriptedGenerator::new(vec![]));

        let (_, without_key) = send(app(None), request()).await;
        let (_, with_key) = send(app(Some(generator)), request()).await;

        assert_eq!(without_key["ai_available"], false);
        assert_eq!(with_key["ai_available"], true);
        assert_eq!(with_key["model"], "gemini-2.0-flash");
    }
}
