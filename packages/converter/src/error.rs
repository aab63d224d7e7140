//! Error types for the converter.
//!
//! Only conditions that stop a whole run are errors. Skipped quiz items and
//! defaulted answers are reported as [`Diagnostic`](crate::types::Diagnostic)
//! values instead, and "no questions found" is an
//! [`ExtractionStatus`](crate::types::ExtractionStatus).

use thiserror::Error;

/// Main error type for the converter library.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Strict XHTML parsing failed; the document cannot be turned into a tree.
    #[error("Markup parsing failed: {0}")]
    MarkupParse(#[from] roxmltree::Error),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download a quiz document.
    #[error("Failed to download {url}: {source}")]
    DocumentDownload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// All retry attempts failed.
    #[error("Download failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Response body exceeds the configured limit.
    #[error("Response from {url} is {size} bytes, limit is {limit} bytes")]
    ResponseTooLarge { url: String, size: u64, limit: u64 },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Taxonomy loading or domain suggestion failed.
    #[error("Domain suggestion failed: {0}")]
    Suggester(#[from] quizport_suggester::SuggesterError),

    /// Unsupported delimiter name.
    #[error("Invalid delimiter '{0}'. Expected 'comma' or 'tab'")]
    InvalidDelimiter(String),

    /// Caller supplied unusable input (missing file, unknown exam, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConverterError>;
