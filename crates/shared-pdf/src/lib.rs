//! Shared PDF handling utilities
//!
//! This crate turns uploaded documents into reconstructed text plus a
//! line/page position map for the clause engine.

pub mod extract;
pub mod position;

pub use extract::{
    extract_bytes, extract_path, extract_pdf, file_extension, is_supported, ExtractError,
    SUPPORTED_EXTENSIONS,
};
pub use position::{from_pages, from_plain_text, ExtractedText};
