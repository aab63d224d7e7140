//! Error types for the domain suggester.

use thiserror::Error;

/// Main error type for the suggester library.
///
/// Empty text or an unknown exam name are not errors for
/// [`DomainSuggester::suggest_domains`](crate::DomainSuggester::suggest_domains);
/// they yield an empty suggestion list. The `Missing*` variants are only
/// raised by the exam-scoped entry points, where they signal a rejected
/// request.
#[derive(Debug, Error)]
pub enum SuggesterError {
    /// Request carried no question text.
    #[error("question_text is required")]
    MissingQuestionText,

    /// Request carried no exam identifier.
    #[error("exam_id is required")]
    MissingExamId,

    /// Reading a taxonomy file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Taxonomy file is not valid YAML for the expected layout.
    #[error("Taxonomy YAML parsing failed: {0}")]
    TaxonomyParse(#[from] serde_yaml_ng::Error),

    /// Taxonomy content is structurally invalid.
    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}

impl SuggesterError {
    /// Whether this error is caused by the caller's input rather than by
    /// the suggester or its data.
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::MissingQuestionText | Self::MissingExamId)
    }
}

/// Result type alias for suggester operations.
pub type Result<T> = std::result::Result<T, SuggesterError>;
