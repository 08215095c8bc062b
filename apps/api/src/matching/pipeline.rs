//! Per-document pipeline: spool → extract → infer → parse → accumulate.
//!
//! Documents are processed strictly one at a time, in upload order. A failure
//! at any stage skips that document and moves on; the batch itself never
//! fails. Sequential processing keeps us friendly to the inference API's rate
//! limits — results would be identical under bounded parallelism as long as
//! output order tracked input order.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::{error, info};

use crate::config::Config;
use crate::llm_client::InferenceBackend;
use crate::matching::extract::extract_text;
use crate::matching::prompts::build_match_prompt;
use crate::matching::reply::json_object_slice;
use crate::matching::DocumentError;
use crate::models::candidate::CandidateRecord;

/// One uploaded document as received from the multipart form.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    /// Media type as declared by the upload, not sniffed from the bytes.
    pub media_type: String,
    pub data: Bytes,
}

pub struct MatchPipeline {
    backend: Arc<dyn InferenceBackend>,
    spool_dir: PathBuf,
}

impl MatchPipeline {
    pub fn new(config: &Config, backend: Arc<dyn InferenceBackend>) -> Self {
        Self {
            backend,
            spool_dir: PathBuf::from(&config.upload_dir),
        }
    }

    /// Runs the whole batch. Returns one record per successfully processed
    /// document, in input order; skipped documents leave no trace in the
    /// output. Never more records than input documents.
    pub async fn run(
        &self,
        job_description: &str,
        documents: Vec<UploadedDocument>,
    ) -> Vec<CandidateRecord> {
        let mut parsed_resumes = Vec::new();
        for document in documents {
            match self.process_document(job_description, &document).await {
                Ok(record) => {
                    info!("Parsed JSON successfully for: {}", document.file_name);
                    parsed_resumes.push(record);
                }
                Err(DocumentError::UnsupportedMediaType(media_type)) => {
                    error!(
                        "Unsupported file type for {}: {media_type}",
                        document.file_name
                    );
                }
                Err(e) => {
                    error!("Error parsing {}: {e}", document.file_name);
                }
            }
        }
        parsed_resumes
    }

    /// Takes one document through every stage. The spooled temp file is
    /// removed when the `NamedTempFile` guard drops, on every exit path.
    async fn process_document(
        &self,
        job_description: &str,
        document: &UploadedDocument,
    ) -> Result<CandidateRecord, DocumentError> {
        info!("Reading file: {}", document.file_name);
        let spooled = spool(&self.spool_dir, &document.data)
            .map_err(|e| DocumentError::Extraction(e.to_string()))?;
        let data = tokio::fs::read(spooled.path())
            .await
            .map_err(|e| DocumentError::Extraction(e.to_string()))?;

        let resume_text = extract_text(&data, &document.media_type)?;
        info!("Finished reading file: {}", document.file_name);

        let prompt = build_match_prompt(job_description, &resume_text);
        info!("Calling inference API for file: {}", document.file_name);
        let reply = self.backend.complete(&prompt).await?;

        let json = json_object_slice(&reply).ok_or(DocumentError::MissingJson)?;
        let record: CandidateRecord = serde_json::from_str(json)?;
        Ok(record)
    }
}

/// Writes upload bytes into the scratch directory. Returning the
/// `NamedTempFile` hands the caller a guard that unlinks the file on drop.
fn spool(dir: &Path, data: &[u8]) -> std::io::Result<NamedTempFile> {
    std::fs::create_dir_all(dir)?;
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(data)?;
    file.flush()?;
    Ok(file)
}
