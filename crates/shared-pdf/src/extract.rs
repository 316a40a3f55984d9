//! Document text extraction
//!
//! Turns an uploaded document into the `(raw_text, position_map)` pair the
//! clause engine consumes. PDFs go through pdf-extract; plain text is
//! indexed as-is.

use std::path::Path;

use pdf_extract::extract_text_from_mem;
use thiserror::Error;
use tracing::debug;

use crate::position::{from_pages, from_plain_text, ExtractedText};

/// File extensions this crate knows how to extract
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt"];

/// Errors that can occur while extracting document text
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Password-protected PDF")]
    PasswordProtected,

    #[error("PDF has no text layer - OCR required")]
    ScannedPdfNeedsOcr,

    #[error("PDF extraction failed: {0}")]
    ExtractionError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Lowercased extension of `filename`, if it has one
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub fn is_supported(filename: &str) -> bool {
    file_extension(filename)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Extract text from PDF bytes, one page per form-feed separated chunk
pub fn extract_pdf(pdf_bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
    let text = extract_text_from_mem(pdf_bytes).map_err(|e| {
        let error_msg = e.to_string().to_lowercase();

        if error_msg.contains("encrypted") || error_msg.contains("password") {
            ExtractError::PasswordProtected
        } else if error_msg.contains("invalid")
            || error_msg.contains("malformed")
            || error_msg.contains("corrupt")
        {
            ExtractError::InvalidPdf(e.to_string())
        } else {
            ExtractError::ExtractionError(e.to_string())
        }
    })?;

    if text.trim().is_empty() {
        return Err(ExtractError::ScannedPdfNeedsOcr);
    }

    let mut pages: Vec<&str> = text.split('\x0C').collect();
    // A trailing form feed closes the last page rather than opening a new one
    if pages.len() > 1 && pages.last().map_or(false, |p| p.trim().is_empty()) {
        pages.pop();
    }

    debug!("Extracted {} chars across {} pages", text.len(), pages.len());
    Ok(from_pages(&pages))
}

/// Extract text from an uploaded document, dispatching on its extension
pub fn extract_bytes(filename: &str, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
    match file_extension(filename).as_deref() {
        Some("pdf") => extract_pdf(bytes),
        Some("txt") => Ok(from_plain_text(&String::from_utf8_lossy(bytes))),
        Some(other) => Err(ExtractError::UnsupportedFormat(other.to_string())),
        None => Err(ExtractError::UnsupportedFormat(filename.to_string())),
    }
}

/// Read and extract a document from disk
pub fn extract_path<P: AsRef<Path>>(path: P) -> Result<ExtractedText, ExtractError> {
    let path = path.as_ref();
    let filename = path.to_string_lossy();
    if !is_supported(&filename) {
        return Err(ExtractError::UnsupportedFormat(filename.into_owned()));
    }

    let bytes = std::fs::read(path)?;
    extract_bytes(&filename, &bytes)
}
