//! API handlers for the clause server
//!
//! Provides REST endpoints for:
//! - Contract analysis of uploaded PDF/text documents
//! - Risk category listing

use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clause_engine::{CategorySpec, ContractAnalyzer};
use serde::{Deserialize, Serialize};
use shared_pdf::{extract_bytes, file_extension, from_plain_text, is_supported, ExtractedText};
use shared_types::{ContractReport, DocumentInfo};
use tracing::{debug, info, warn};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "clause-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Category list response
#[derive(Serialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub categories: Vec<CategorySpec>,
    pub count: usize,
}

/// Handler: GET /api/categories
pub async fn handle_list_categories(State(state): State<AppState>) -> Json<CategoryListResponse> {
    let categories = state.analyzer.taxonomy().categories.clone();
    let count = categories.len();

    Json(CategoryListResponse {
        success: true,
        categories,
        count,
    })
}

/// Analysis request body
///
/// Either `text` is given, or `filename` together with base64 `data`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Uploaded file name; its extension selects the extractor
    pub filename: Option<String>,

    /// Base64-encoded document bytes
    pub data: Option<String>,

    /// Raw contract text, analysed without extraction
    pub text: Option<String>,
}

/// Analysis response
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub report: ContractReport,
}

/// Document content after request validation
pub(crate) enum Upload {
    Text(String),
    Document { filename: String, bytes: Vec<u8> },
}

/// Handler: POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ServerError> {
    let Json(req) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(state.max_upload_bytes)
        } else {
            ServerError::InvalidRequest(rejection.body_text())
        }
    })?;

    let source_name = req.filename.clone();
    let upload = validate_request(req, state.max_upload_bytes)?;
    match &upload {
        Upload::Text(text) => info!("Analyze request: {} chars of text", text.chars().count()),
        Upload::Document { filename, bytes } => {
            info!("Analyze request: {} ({} bytes)", filename, bytes.len())
        }
    }

    let analyzer = state.analyzer.clone();
    let task = tokio::task::spawn_blocking(move || -> Result<ContractReport, ServerError> {
        let extracted = match upload {
            Upload::Text(text) => from_plain_text(&text),
            Upload::Document { filename, bytes } => extract_bytes(&filename, &bytes)?,
        };
        Ok(analyze_extracted(&analyzer, extracted, source_name))
    });

    let report = match tokio::time::timeout(Duration::from_millis(state.timeout_ms), task).await {
        Ok(Ok(result)) => result?,
        Ok(Err(join_error)) => {
            return Err(ServerError::Internal(format!(
                "Analysis task failed: {}",
                join_error
            )))
        }
        Err(_) => {
            warn!("Analysis exceeded {}ms", state.timeout_ms);
            return Err(ServerError::Timeout(state.timeout_ms));
        }
    };

    Ok(Json(AnalyzeResponse {
        success: true,
        report,
    }))
}

/// Check the request shape, extension and size before any work is done
pub(crate) fn validate_request(
    req: AnalyzeRequest,
    max_upload_bytes: usize,
) -> Result<Upload, ServerError> {
    if let Some(text) = req.text {
        if text.len() > max_upload_bytes {
            return Err(ServerError::PayloadTooLarge(max_upload_bytes));
        }
        return Ok(Upload::Text(text));
    }

    let filename = req.filename.ok_or_else(|| {
        ServerError::InvalidRequest("Provide either 'text' or 'filename' with 'data'".into())
    })?;
    let data = req
        .data
        .ok_or_else(|| ServerError::InvalidRequest("Missing 'data' for uploaded file".into()))?;

    if !is_supported(&filename) {
        let ext = file_extension(&filename).unwrap_or_else(|| filename.clone());
        return Err(ServerError::UnsupportedFileType(ext));
    }

    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|e| ServerError::InvalidRequest(format!("Invalid base64 data: {}", e)))?;
    if bytes.len() > max_upload_bytes {
        return Err(ServerError::PayloadTooLarge(max_upload_bytes));
    }

    debug!("Decoded {} bytes for {}", bytes.len(), filename);
    Ok(Upload::Document { filename, bytes })
}

/// Run the engine over extracted text and attach document metadata
pub fn analyze_extracted(
    analyzer: &ContractAnalyzer,
    extracted: ExtractedText,
    filename: Option<String>,
) -> ContractReport {
    let mut report = analyzer.analyze(&extracted.raw_text, &extracted.position_map);
    report.document = Some(DocumentInfo {
        filename,
        pages: Some(extracted.page_count),
    });
    report
}
