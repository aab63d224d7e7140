//! Core types for quiz extraction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{MULTIPLE_TYPE_MARKER, SINGLE_TYPE_MARKER};

/// Question type derived from the answer list's `data-type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Exactly one correct answer.
    SingleAnswer,
    /// Two or more correct answers.
    MultiAnswer,
    /// Missing or unrecognised marker.
    Unknown,
}

impl QuestionType {
    /// Map a raw `data-type` value.
    ///
    /// # Examples
    /// ```
    /// use quizport_converter::QuestionType;
    ///
    /// assert_eq!(QuestionType::from_marker(Some("single")), QuestionType::SingleAnswer);
    /// assert_eq!(QuestionType::from_marker(Some("multiple")), QuestionType::MultiAnswer);
    /// assert_eq!(QuestionType::from_marker(Some("sort_answer")), QuestionType::Unknown);
    /// assert_eq!(QuestionType::from_marker(None), QuestionType::Unknown);
    /// ```
    pub fn from_marker(marker: Option<&str>) -> Self {
        match marker.map(str::trim) {
            Some(SINGLE_TYPE_MARKER) => Self::SingleAnswer,
            Some(MULTIPLE_TYPE_MARKER) => Self::MultiAnswer,
            _ => Self::Unknown,
        }
    }

    /// Label written to the `Question Type` column.
    ///
    /// Unknown questions are exported as multi-select.
    pub fn export_label(self) -> &'static str {
        match self {
            Self::SingleAnswer => "multiple-choice",
            Self::MultiAnswer | Self::Unknown => "multi-select",
        }
    }

    /// Whether at least two correct answers are required.
    pub fn requires_multiple_answers(self) -> bool {
        matches!(self, Self::MultiAnswer)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SingleAnswer => "single answer",
            Self::MultiAnswer => "multi answer",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// One answer option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Normalised label text, without input controls.
    pub text: String,
    /// 1-based position in document order.
    pub position: usize,
    /// Per-option explanation; empty for widget exports.
    pub explanation: String,
}

/// How the correct answers of a question were determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// Correct-answer class on an answer item.
    Structural,
    /// Letter list in the explanation text.
    ExplanationText,
    /// One letter found in the explanation and a second position added.
    Augmented,
    /// Nothing found; fallback positions used.
    Defaulted,
}

impl AnswerSource {
    /// Whether the fallback policy contributed to the answer set.
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Augmented | Self::Defaulted)
    }
}

/// A question recovered from one quiz item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedQuestion {
    /// Normalised question text, never empty.
    pub question_text: String,
    pub question_type: QuestionType,
    /// Answers with contiguous positions `1..=N`.
    pub answers: Vec<AnswerOption>,
    /// Correct 1-based positions, unique and ascending once resolved.
    pub correct_answers: Vec<usize>,
    pub answer_source: AnswerSource,
    /// Set when the answers need review: they came from the fallback policy
    /// or do not fit the export slots.
    pub was_defaulted: bool,
    /// Explanation fragments joined with `" | "`.
    pub explanation: String,
    /// Exam domain, empty unless filled in later.
    pub domain: String,
}

impl ExtractedQuestion {
    /// Create an unresolved question.
    pub fn new(question_text: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            question_text: question_text.into(),
            question_type,
            answers: Vec::new(),
            correct_answers: Vec::new(),
            answer_source: AnswerSource::Defaulted,
            was_defaulted: false,
            explanation: String::new(),
            domain: String::new(),
        }
    }

    /// Add an answer at the next position.
    #[must_use]
    pub fn with_answer(mut self, text: impl Into<String>) -> Self {
        let position = self.answers.len() + 1;
        self.answers.push(AnswerOption {
            text: text.into(),
            position,
            explanation: String::new(),
        });
        self
    }

    /// Set the overall explanation.
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Set the domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Record the resolved answer set.
    pub fn set_correct_answers(&mut self, mut positions: Vec<usize>, source: AnswerSource) {
        positions.sort_unstable();
        positions.dedup();
        self.correct_answers = positions;
        self.answer_source = source;
        self.was_defaulted = source.is_fallback();
    }
}

/// Kind of a per-item extraction note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    SkippedNoQuestionText,
    UnknownQuestionType,
    MissingAnswerLabel,
    CorrectAnswersDefaulted,
    CorrectAnswersAugmented,
    AnswerLetterOutOfRange,
    CorrectAnswersNotExportable,
}

/// A skip or fallback decision for one quiz item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based index of the quiz item in the document.
    pub item: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item {}: {}", self.item, self.message)
    }
}

/// Outcome of an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionStatus {
    Extracted { count: usize },
    /// The document held no usable quiz items. Not an error, but callers
    /// should surface it.
    NoQuestionsFound,
}

/// Result of extracting a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Resolved questions in document order.
    pub questions: Vec<ExtractedQuestion>,
    /// Quiz items seen, including skipped ones.
    pub items_found: usize,
    /// Quiz items without question text.
    pub skipped: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ExtractionReport {
    pub fn status(&self) -> ExtractionStatus {
        if self.questions.is_empty() {
            ExtractionStatus::NoQuestionsFound
        } else {
            ExtractionStatus::Extracted {
                count: self.questions.len(),
            }
        }
    }

    /// Number of questions whose answers need human review.
    pub fn defaulted_count(&self) -> usize {
        self.questions.iter().filter(|q| q.was_defaulted).count()
    }

    /// Diagnostics of one kind.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}
