//! Error types for the clause engine

use thiserror::Error;

/// Errors raised while loading or compiling a risk taxonomy
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to read taxonomy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed taxonomy: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid taxonomy: {0}")]
    Invalid(String),

    #[error("Keyword '{keyword}' in category '{category}' does not compile: {source}")]
    Keyword {
        category: String,
        keyword: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure reported by a linguistic-signal collaborator for one clause
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("Linguistic analysis unavailable: {0}")]
    Unavailable(String),

    #[error("Linguistic analysis failed: {0}")]
    Failed(String),
}
