//! Resume matching — the extraction → inference → aggregation pipeline.

pub mod extract;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod reply;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Why one document produced no `CandidateRecord`.
///
/// Every variant is skip-and-log: a bad file never aborts the batch, affects
/// other files, or becomes an HTTP error.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("text extraction failed: {0}")]
    Extraction(String),

    #[error("inference call failed: {0}")]
    Transport(#[from] LlmError),

    #[error("no JSON object found in model reply")]
    MissingJson,

    #[error("malformed JSON in model reply: {0}")]
    MalformedJson(#[from] serde_json::Error),
}
