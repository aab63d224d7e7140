//! Conversion service that ties extraction, domain pre-fill and export
//! together.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use quizport_suggester::config::DEFAULT_MIN_CONFIDENCE;
use quizport_suggester::{DomainSuggester, InMemoryDomainStore, KeywordTaxonomy, SuggestionRequest};
use serde::Serialize;

use crate::config::{
    default_output_for_url, default_output_path, is_remote_source, DEFAULT_MAX_DOCUMENT_SIZE,
};
use crate::error::{ConverterError, Result};
use crate::export::{Delimiter, ExportStats, TabularExporter};
use crate::extract::{extract_html, extract_xhtml};
use crate::http::fetch_document;
use crate::types::{Diagnostic, ExtractedQuestion, ExtractionReport, ExtractionStatus};

/// Options for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Parse as strict XHTML and fail on malformed markup.
    pub strict: bool,
    pub delimiter: Delimiter,
    /// Exam whose domains are suggested for questions without a domain.
    pub exam: Option<String>,
    /// Minimum confidence for a suggested domain to be written.
    pub min_confidence: f64,
    pub taxonomy: Arc<KeywordTaxonomy>,
    /// Size limit for downloaded documents, in bytes.
    pub max_document_size: u64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            strict: false,
            delimiter: Delimiter::default(),
            exam: None,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            taxonomy: Arc::new(KeywordTaxonomy::builtin()),
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
        }
    }
}

impl ConvertOptions {
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_exam(mut self, exam: impl Into<String>) -> Self {
        self.exam = Some(exam.into());
        self
    }

    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    #[must_use]
    pub fn with_taxonomy(mut self, taxonomy: Arc<KeywordTaxonomy>) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    #[must_use]
    pub fn with_max_document_size(mut self, max_document_size: u64) -> Self {
        self.max_document_size = max_document_size;
        self
    }
}

/// Result of converting one document in memory.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub report: ExtractionReport,
    pub stats: ExportStats,
    /// Number of questions that received a suggested domain.
    pub domains_assigned: usize,
    /// Export rows of the extracted questions.
    pub exporter: TabularExporter,
}

impl Conversion {
    pub fn status(&self) -> ExtractionStatus {
        self.report.status()
    }

    /// Render the export, header included.
    ///
    /// # Errors
    /// Returns an error if formatting fails.
    pub fn to_csv(&self) -> Result<String> {
        self.exporter.to_string()
    }
}

/// Convert quiz markup to export text.
///
/// # Errors
/// Fails on malformed markup in strict mode and on an exam that is not in
/// the taxonomy. Finding no questions is not an error; check
/// [`Conversion::status`].
pub fn convert_html(source: &str, options: &ConvertOptions) -> Result<Conversion> {
    let mut report = if options.strict {
        extract_xhtml(source)?
    } else {
        extract_html(source)
    };

    let domains_assigned = match &options.exam {
        Some(exam) => {
            let suggester = DomainSuggester::new(Arc::clone(&options.taxonomy));
            assign_domains(
                &mut report.questions,
                &suggester,
                exam,
                options.min_confidence,
            )?
        }
        None => 0,
    };

    let mut exporter = TabularExporter::new().with_delimiter(options.delimiter);
    exporter.add_questions(&report.questions);

    Ok(Conversion {
        stats: exporter.stats(),
        exporter,
        domains_assigned,
        report,
    })
}

/// Fill empty domains with the best suggestion for `exam_name`.
///
/// Questions that already have a domain are left alone. Returns the number
/// of questions that received a domain.
///
/// # Errors
/// `InvalidInput` if the exam is not in the suggester's taxonomy.
pub fn assign_domains(
    questions: &mut [ExtractedQuestion],
    suggester: &DomainSuggester,
    exam_name: &str,
    min_confidence: f64,
) -> Result<usize> {
    let store = InMemoryDomainStore::from_taxonomy(suggester.taxonomy());
    let exam = store.active_exam_by_name(exam_name).ok_or_else(|| {
        ConverterError::InvalidInput(format!("exam '{exam_name}' is not in the taxonomy"))
    })?;

    let mut assigned = 0;
    for question in questions.iter_mut().filter(|q| q.domain.is_empty()) {
        let request = SuggestionRequest::new(question.question_text.as_str(), exam.id);
        match suggester.best_domain_for_question(&store, &request, min_confidence)? {
            Some(best) => {
                tracing::debug!(
                    domain = %best.suggestion.domain_name,
                    confidence = best.suggestion.confidence,
                    "assigned suggested domain"
                );
                question.domain = best.suggestion.domain_name;
                assigned += 1;
            }
            None => {
                tracing::debug!(
                    question = %question.question_text,
                    "no confident domain suggestion"
                );
            }
        }
    }
    tracing::info!(
        exam = exam_name,
        assigned,
        total = questions.len(),
        "assigned domains"
    );
    Ok(assigned)
}

/// Read a local file or download an http(s) URL.
///
/// # Errors
/// `InvalidInput` for a missing local file, download errors for URLs.
pub fn load_source(input: &str, max_document_size: u64) -> Result<String> {
    if is_remote_source(input) {
        tracing::info!(url = input, "downloading quiz page");
        return fetch_document(input, max_document_size);
    }

    let path = Path::new(input);
    if !path.is_file() {
        return Err(ConverterError::InvalidInput(format!(
            "input file '{input}' not found"
        )));
    }
    Ok(fs::read_to_string(path)?)
}

/// Outcome of [`convert_file`], serialisable as a run report.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub input: String,
    pub output: PathBuf,
    #[serde(flatten)]
    pub status: ExtractionStatus,
    pub items_found: usize,
    pub questions: usize,
    pub skipped: usize,
    /// Questions whose correct answers need review.
    pub defaulted: usize,
    pub domains_assigned: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ExportStats,
    pub generated_at: DateTime<Utc>,
}

/// Convert `input` (path or URL) and write the export.
///
/// Without `output` the export goes next to a local input as
/// `<stem>_udemy_questions.csv`, or into the working directory for URLs. A
/// document without questions still produces a header-only export.
///
/// # Errors
/// See [`load_source`] and [`convert_html`]; also fails if the output
/// cannot be written.
pub fn convert_file(
    input: &str,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<ConversionSummary> {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None if is_remote_source(input) => default_output_for_url(input),
        None => default_output_path(Path::new(input)),
    };

    let source = load_source(input, options.max_document_size)?;
    let conversion = convert_html(&source, options)?;
    conversion.exporter.save_to_file(&output)?;

    let report = conversion.report;
    Ok(ConversionSummary {
        input: input.to_string(),
        output,
        status: report.status(),
        items_found: report.items_found,
        questions: report.questions.len(),
        skipped: report.skipped,
        defaulted: report.defaulted_count(),
        domains_assigned: conversion.domains_assigned,
        diagnostics: report.diagnostics,
        stats: conversion.stats,
        generated_at: Utc::now(),
    })
}
