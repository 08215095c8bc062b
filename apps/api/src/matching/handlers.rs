use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::matching::pipeline::UploadedDocument;
use crate::models::candidate::CandidateRecord;
use crate::state::AppState;

/// Upload form cap, mirrored here so oversized batches fail fast.
pub const MAX_RESUME_FILES: usize = 20;

#[derive(Debug, Serialize)]
pub struct ParseResumesResponse {
    #[serde(rename = "parsedResumes")]
    pub parsed_resumes: Vec<CandidateRecord>,
}

/// POST /parse-resumes
///
/// Multipart form: up to 20 `resumes` file parts plus a `jobDescription`
/// text field. Validation failures are plain-text 400s; everything past
/// validation responds 200 with whatever subset of files succeeded.
pub async fn handle_parse_resumes(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResumesResponse>, AppError> {
    info!("Received request to parse resumes.");

    let mut job_description = String::new();
    let mut documents: Vec<UploadedDocument> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        match field.name().unwrap_or("") {
            "jobDescription" => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable job description: {e}")))?;
            }
            "resumes" => {
                if documents.len() >= MAX_RESUME_FILES {
                    return Err(AppError::Validation(format!(
                        "Too many resumes uploaded (max {MAX_RESUME_FILES})."
                    )));
                }
                let file_name = field.file_name().unwrap_or("unknown").to_string();
                let media_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable file upload: {e}")))?;
                documents.push(UploadedDocument {
                    file_name,
                    media_type,
                    data,
                });
            }
            _ => {
                // Drain unknown fields so the multipart stream stays readable.
                let _ = field.bytes().await;
            }
        }
    }

    if documents.is_empty() {
        error!("No resumes uploaded.");
        return Err(AppError::Validation("No resumes uploaded.".to_string()));
    }
    if job_description.trim().is_empty() {
        error!("No job description provided.");
        return Err(AppError::Validation(
            "Job description is required.".to_string(),
        ));
    }

    let parsed_resumes = state.pipeline.run(&job_description, documents).await;
    Ok(Json(ParseResumesResponse { parsed_resumes }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::extract::{DOCX_MIME, PDF_MIME};
    use crate::matching::pipeline::tests::{docx_fixture, test_pipeline, ScriptedBackend};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-RESUME-TEST-BOUNDARY";
    const MOCK_RECORD_JSON: &str = r#"{"FullName":"A","Email":"a@x.com","Phone":"1","SkillsMatched":["Go"],"TotalExperienceYears":"3","FitScoreOutOf100":"80"}"#;

    struct MultipartBody(Vec<u8>);

    impl MultipartBody {
        fn new() -> Self {
            Self(Vec::new())
        }

        fn text_field(mut self, name: &str, value: &str) -> Self {
            self.0.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
            self
        }

        fn file_field(mut self, name: &str, file_name: &str, media_type: &str, data: &[u8]) -> Self {
            self.0.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {media_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            self.0.extend_from_slice(data);
            self.0.extend_from_slice(b"\r\n");
            self
        }

        fn finish(mut self) -> Vec<u8> {
            self.0
                .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
            self.0
        }
    }

    fn test_app(backend: Arc<ScriptedBackend>, spool_dir: &std::path::Path) -> axum::Router {
        let state = AppState {
            pipeline: Arc::new(test_pipeline(backend, spool_dir)),
        };
        crate::routes::build_router(state)
    }

    async fn post_multipart(app: axum::Router, body: Vec<u8>) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/parse-resumes")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    #[tokio::test]
    async fn test_no_files_is_400_and_no_inference_calls() {
        let spool = tempfile::tempdir().unwrap();
        let backend = ScriptedBackend::new(|_| Ok(MOCK_RECORD_JSON.to_string()));
        let app = test_app(backend.clone(), spool.path());

        let body = MultipartBody::new()
            .text_field("jobDescription", "Need a Rust engineer")
            .finish();
        let (status, body) = post_multipart(app, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No resumes uploaded.");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_job_description_is_400() {
        let spool = tempfile::tempdir().unwrap();
        let backend = ScriptedBackend::new(|_| Ok(MOCK_RECORD_JSON.to_string()));
        let app = test_app(backend.clone(), spool.path());

        let body = MultipartBody::new()
            .file_field("resumes", "a.docx", DOCX_MIME, &docx_fixture(&["Jane Doe"]))
            .text_field("jobDescription", "   \n\t ")
            .finish();
        let (status, body) = post_multipart(app, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Job description is required.");
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_job_description_is_400() {
        let spool = tempfile::tempdir().unwrap();
        let backend = ScriptedBackend::new(|_| Ok(MOCK_RECORD_JSON.to_string()));
        let app = test_app(backend, spool.path());

        let body = MultipartBody::new()
            .file_field("resumes", "a.docx", DOCX_MIME, &docx_fixture(&["Jane Doe"]))
            .finish();
        let (status, body) = post_multipart(app, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Job description is required.");
    }

    #[tokio::test]
    async fn test_unsupported_file_yields_empty_result_set() {
        let spool = tempfile::tempdir().unwrap();
        let backend = ScriptedBackend::new(|_| Ok(MOCK_RECORD_JSON.to_string()));
        let app = test_app(backend.clone(), spool.path());

        let body = MultipartBody::new()
            .file_field("resumes", "notes.txt", "text/plain", b"some plain text")
            .text_field("jobDescription", "Need a Rust engineer")
            .finish();
        let (status, body) = post_multipart(app, body).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["parsedResumes"], serde_json::json!([]));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_batch_returns_parsed_resumes() {
        let spool = tempfile::tempdir().unwrap();
        let backend = ScriptedBackend::new(|_| Ok(format!("Sure:\n{MOCK_RECORD_JSON}")));
        let app = test_app(backend.clone(), spool.path());

        let body = MultipartBody::new()
            .file_field("resumes", "a.docx", DOCX_MIME, &docx_fixture(&["Jane Doe, Rust"]))
            .text_field("jobDescription", "Need a Rust engineer")
            .finish();
        let (status, body) = post_multipart(app, body).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["parsedResumes"][0]["FullName"], "A");
        assert_eq!(json["parsedResumes"][0]["FitScoreOutOf100"], "80");
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_more_than_twenty_files_is_400() {
        let spool = tempfile::tempdir().unwrap();
        let backend = ScriptedBackend::new(|_| Ok(MOCK_RECORD_JSON.to_string()));
        let app = test_app(backend.clone(), spool.path());

        let mut body = MultipartBody::new().text_field("jobDescription", "jd");
        for i in 0..(MAX_RESUME_FILES + 1) {
            body = body.file_field(
                "resumes",
                &format!("r{i}.pdf"),
                PDF_MIME,
                b"placeholder bytes",
            );
        }
        let (status, _) = post_multipart(app, body.finish()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(backend.calls(), 0);
    }
}
