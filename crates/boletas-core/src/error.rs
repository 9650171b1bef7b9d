//! Error types for the boletas-core library.

use thiserror::Error;

/// Main error type for the boletas library.
#[derive(Error, Debug)]
pub enum BoletasError {
    /// Bill extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to bill field extraction.
///
/// Individual fields never fail: an unresolved field is `None`. These
/// variants cover the document-level conditions only.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The input text was empty or whitespace only.
    #[error("no text to parse")]
    EmptyInput,

    /// Required field is missing.
    #[error("missing required field: {0}")]
    MissingField(String),
}

/// Result type for the boletas library.
pub type Result<T> = std::result::Result<T, BoletasError>;
