//! Extraction stage: document bytes + declared media type → plain text.
//!
//! Text fidelity is whatever the extraction libraries give us — PDF page text
//! in document order with default flow heuristics, DOCX run text with all
//! formatting stripped.

use crate::matching::DocumentError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Extracts plain text from a document according to its declared media type.
pub fn extract_text(data: &[u8], media_type: &str) -> Result<String, DocumentError> {
    match media_type {
        PDF_MIME => extract_text_from_pdf(data),
        DOCX_MIME => extract_text_from_docx(data),
        other => Err(DocumentError::UnsupportedMediaType(other.to_string())),
    }
}

fn extract_text_from_pdf(data: &[u8]) -> Result<String, DocumentError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| DocumentError::Extraction(e.to_string()))
}

fn extract_text_from_docx(data: &[u8]) -> Result<String, DocumentError> {
    let docx =
        docx_rs::read_docx(data).map_err(|e| DocumentError::Extraction(e.to_string()))?;
    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}
