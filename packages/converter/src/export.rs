//! Tabular export in the course-platform bulk import layout.
//!
//! Every question becomes one row of 17 columns: question, type, six
//! answer/explanation pairs, the correct positions, the overall explanation
//! and the domain.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::EXPORT_ANSWER_SLOTS;
use crate::error::{ConverterError, Result};
use crate::types::ExtractedQuestion;

/// Header row of the export.
pub const EXPORT_HEADERS: [&str; 17] = [
    "Question",
    "Question Type",
    "Answer Option 1",
    "Explanation 1",
    "Answer Option 2",
    "Explanation 2",
    "Answer Option 3",
    "Explanation 3",
    "Answer Option 4",
    "Explanation 4",
    "Answer Option 5",
    "Explanation 5",
    "Answer Option 6",
    "Explanation 6",
    "Correct Answers",
    "Overall Explanation",
    "Domain",
];

/// A question that can be written as an export row.
pub trait ExportQuestion {
    fn question_text(&self) -> &str;

    /// `multiple-choice` or `multi-select`.
    fn type_label(&self) -> &str;

    /// `(answer text, answer explanation)` pairs in display order.
    fn answer_cells(&self) -> Vec<(&str, &str)>;

    /// 1-based positions of the correct answers.
    fn correct_positions(&self) -> Vec<usize>;

    fn overall_explanation(&self) -> &str;

    fn domain(&self) -> &str;
}

impl ExportQuestion for ExtractedQuestion {
    fn question_text(&self) -> &str {
        &self.question_text
    }

    fn type_label(&self) -> &str {
        self.question_type.export_label()
    }

    fn answer_cells(&self) -> Vec<(&str, &str)> {
        self.answers
            .iter()
            .map(|answer| (answer.text.as_str(), answer.explanation.as_str()))
            .collect()
    }

    fn correct_positions(&self) -> Vec<usize> {
        self.correct_answers.clone()
    }

    fn overall_explanation(&self) -> &str {
        &self.explanation
    }

    fn domain(&self) -> &str {
        &self.domain
    }
}

/// One stored answer of a [`QuestionAggregate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateAnswer {
    pub answer_text: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
    /// Display order; answers are exported sorted by it.
    #[serde(default)]
    pub order: u32,
}

/// A question with its answers as held by a question store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAggregate {
    pub question_text: String,
    /// Internal type name: `multiple_choice` or `multiple_select`.
    pub question_type: String,
    pub answers: Vec<AggregateAnswer>,
    #[serde(default)]
    pub overall_explanation: String,
    #[serde(default)]
    pub domain: Option<String>,
}

impl QuestionAggregate {
    fn ordered_answers(&self) -> Vec<&AggregateAnswer> {
        let mut answers: Vec<&AggregateAnswer> = self.answers.iter().collect();
        answers.sort_by_key(|answer| answer.order);
        answers
    }
}

impl ExportQuestion for QuestionAggregate {
    fn question_text(&self) -> &str {
        &self.question_text
    }

    /// Anything other than `multiple_choice` exports as multi-select.
    fn type_label(&self) -> &str {
        match self.question_type.as_str() {
            "multiple_choice" => "multiple-choice",
            _ => "multi-select",
        }
    }

    fn answer_cells(&self) -> Vec<(&str, &str)> {
        self.ordered_answers()
            .into_iter()
            .map(|answer| {
                (
                    answer.answer_text.as_str(),
                    answer.explanation.as_deref().unwrap_or_default(),
                )
            })
            .collect()
    }

    fn correct_positions(&self) -> Vec<usize> {
        (1..)
            .zip(self.ordered_answers())
            .filter(|(_, answer)| answer.is_correct)
            .map(|(position, _)| position)
            .collect()
    }

    fn overall_explanation(&self) -> &str {
        &self.overall_explanation
    }

    fn domain(&self) -> &str {
        self.domain.as_deref().unwrap_or_default()
    }
}

/// Field delimiter of the export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    pub(crate) fn byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }
}

impl FromStr for Delimiter {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comma" | "," => Ok(Self::Comma),
            "tab" | "\\t" | "\t" => Ok(Self::Tab),
            other => Err(ConverterError::InvalidDelimiter(other.to_string())),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Comma => "comma",
            Self::Tab => "tab",
        })
    }
}

/// One formatted export row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    cells: Vec<String>,
}

impl ExportRow {
    /// Format a question.
    ///
    /// Answers beyond the sixth are dropped, as are correct positions that
    /// point at them. An empty correct set is written as `1`.
    pub fn from_question<Q: ExportQuestion + ?Sized>(question: &Q) -> Self {
        let answers = question.answer_cells();
        if answers.len() > EXPORT_ANSWER_SLOTS {
            tracing::warn!(
                question = %preview(question.question_text()),
                answers = answers.len(),
                dropped = answers.len() - EXPORT_ANSWER_SLOTS,
                "question has more answers than export slots, extra answers dropped"
            );
        }

        let mut cells = Vec::with_capacity(EXPORT_HEADERS.len());
        cells.push(question.question_text().to_string());
        cells.push(question.type_label().to_string());
        for slot in 0..EXPORT_ANSWER_SLOTS {
            let (text, explanation) = answers.get(slot).copied().unwrap_or(("", ""));
            cells.push(text.to_string());
            cells.push(explanation.to_string());
        }
        cells.push(correct_answers_cell(question));
        cells.push(question.overall_explanation().to_string());
        cells.push(question.domain().to_string());
        Self { cells }
    }

    /// Cell values in header order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Value of a column by header name.
    pub fn get(&self, header: &str) -> Option<&str> {
        EXPORT_HEADERS
            .iter()
            .position(|h| *h == header)
            .and_then(|index| self.cells.get(index))
            .map(String::as_str)
    }

    fn non_empty_answer_count(&self) -> usize {
        (0..EXPORT_ANSWER_SLOTS)
            .filter(|slot| !self.cells[2 + slot * 2].is_empty())
            .count()
    }
}

fn correct_answers_cell<Q: ExportQuestion + ?Sized>(question: &Q) -> String {
    let mut positions = question.correct_positions();
    positions.sort_unstable();
    positions.dedup();

    let (kept, dropped): (Vec<usize>, Vec<usize>) = positions
        .into_iter()
        .partition(|&position| (1..=EXPORT_ANSWER_SLOTS).contains(&position));
    if !dropped.is_empty() {
        tracing::warn!(
            question = %preview(question.question_text()),
            ?dropped,
            "correct answers outside the export slots dropped"
        );
    }

    if kept.is_empty() {
        return "1".to_string();
    }
    kept.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 60;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(MAX_CHARS).collect();
        format!("{truncated}...")
    }
}

/// Summary of the rows held by a [`TabularExporter`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportStats {
    pub total_questions: usize,
    /// Row count per `Question Type` label.
    pub question_types: BTreeMap<String, usize>,
    /// Row count per domain, including the empty domain.
    pub domains: BTreeMap<String, usize>,
    /// Mean number of non-empty answer options per row, 2 decimals.
    pub avg_answers_per_question: f64,
}

/// Accumulates export rows and writes them as delimited text.
///
/// # Examples
/// ```
/// use quizport_converter::{ExtractedQuestion, QuestionType, TabularExporter};
///
/// let mut question = ExtractedQuestion::new("Pick one", QuestionType::SingleAnswer)
///     .with_answer("Yes")
///     .with_answer("No");
/// question.correct_answers = vec![1];
///
/// let mut exporter = TabularExporter::new();
/// exporter.add_question(&question);
/// let csv = exporter.to_string().unwrap();
/// assert!(csv.starts_with("Question,Question Type,Answer Option 1"));
/// assert!(csv.contains("Pick one,multiple-choice,Yes,,No,"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TabularExporter {
    rows: Vec<ExportRow>,
    delimiter: Delimiter,
}

impl TabularExporter {
    /// Create an empty comma-delimited exporter.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn add_question<Q: ExportQuestion + ?Sized>(&mut self, question: &Q) {
        self.rows.push(ExportRow::from_question(question));
    }

    pub fn add_questions<'a, Q, I>(&mut self, questions: I)
    where
        Q: ExportQuestion + 'a,
        I: IntoIterator<Item = &'a Q>,
    {
        for question in questions {
            self.add_question(question);
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the header and all rows.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter.byte())
            .from_writer(writer);
        csv_writer.write_record(EXPORT_HEADERS)?;
        for row in &self.rows {
            csv_writer.write_record(row.cells())?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Render the export as a string.
    ///
    /// # Errors
    /// Returns an error if formatting fails.
    pub fn to_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the export to a file, replacing it if it exists.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)?;
        tracing::info!(path = %path.display(), rows = self.len(), "wrote export");
        Ok(())
    }

    pub fn stats(&self) -> ExportStats {
        if self.rows.is_empty() {
            return ExportStats::default();
        }

        let mut stats = ExportStats {
            total_questions: self.rows.len(),
            ..ExportStats::default()
        };
        let mut total_answers = 0;
        for row in &self.rows {
            let label = row.get("Question Type").unwrap_or_default().to_string();
            *stats.question_types.entry(label).or_default() += 1;
            let domain = row.get("Domain").unwrap_or_default().to_string();
            *stats.domains.entry(domain).or_default() += 1;
            total_answers += row.non_empty_answer_count();
        }
        let average = total_answers as f64 / stats.total_questions as f64;
        stats.avg_answers_per_question = (average * 100.0).round() / 100.0;
        stats
    }
}
