//! Quizport converter - Extract quiz questions from exported quiz pages.
//!
//! This crate reads pages exported from a WordPress quiz widget, recovers
//! each question with its answers, correct answers and explanation, and
//! writes them in the 17-column CSV layout used for bulk question import.
//! Domains can be pre-filled with suggestions from `quizport-suggester`.
//!
//! # Example
//!
//! ```
//! use quizport_converter::{extract_html, TabularExporter};
//!
//! let html = r#"<ol><li class="wpProQuiz_listItem">
//!   <div class="wpProQuiz_question_text">Which services are serverless?</div>
//!   <ul class="wpProQuiz_questionList" data-type="multiple">
//!     <li class="wpProQuiz_questionListItem" data-pos="0"><label><input type="checkbox"> Cloud Run</label></li>
//!     <li class="wpProQuiz_questionListItem" data-pos="1"><label><input type="checkbox"> Compute Engine</label></li>
//!     <li class="wpProQuiz_questionListItem" data-pos="2"><label><input type="checkbox"> Cloud Functions</label></li>
//!   </ul>
//!   <div class="wpProQuiz_response"><p>Correct answers: A, C</p></div>
//! </li></ol>"#;
//!
//! let report = extract_html(html);
//! assert_eq!(report.questions[0].correct_answers, vec![1, 3]);
//!
//! let mut exporter = TabularExporter::new();
//! exporter.add_questions(&report.questions);
//! assert!(exporter.to_string().unwrap().contains("multi-select,Cloud Run"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Widget class names and export constants
//! - [`types`]: Extracted questions and the extraction report
//! - [`error`]: Error types and Result alias
//! - [`markup`]: Parser-independent document interface and backends
//! - [`extract`]: Quiz item extraction
//! - [`resolve`]: Correct-answer resolution and fallback policy
//! - [`export`]: CSV export
//! - [`http`]: HTTP client for fetching quiz pages
//! - [`convert`]: Conversion service
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod extract;
pub mod http;
pub mod markup;
pub mod resolve;
pub mod types;

pub use convert::{convert_file, convert_html, Conversion, ConversionSummary, ConvertOptions};
pub use error::{ConverterError, Result};
pub use export::{
    AggregateAnswer, Delimiter, ExportQuestion, ExportRow, ExportStats, QuestionAggregate,
    TabularExporter, EXPORT_HEADERS,
};
pub use extract::{extract_html, extract_questions, extract_xhtml};
pub use types::{
    AnswerOption, AnswerSource, Diagnostic, DiagnosticKind, ExtractedQuestion, ExtractionReport,
    ExtractionStatus, QuestionType,
};
