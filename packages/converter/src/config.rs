//! Configuration constants for the converter.
//!
//! The class and attribute names describe the markup of the WordPress
//! quiz widget whose exported pages this crate reads.

use std::path::{Path, PathBuf};

/// Class of one quiz item (question with answers and explanation).
pub const QUIZ_ITEM_CLASS: &str = "wpProQuiz_listItem";

/// Class of the node holding the question text.
pub const QUESTION_TEXT_CLASS: &str = "wpProQuiz_question_text";

/// Class of the answer list container.
pub const ANSWER_LIST_CLASS: &str = "wpProQuiz_questionList";

/// Class of one answer item.
pub const ANSWER_ITEM_CLASS: &str = "wpProQuiz_questionListItem";

/// Class marking the correct answer item of a single-answer question.
pub const CORRECT_ANSWER_CLASS: &str = "wpProQuiz_answerCorrect";

/// Class of the explanation container.
pub const EXPLANATION_CLASS: &str = "wpProQuiz_response";

/// Attribute on the answer list carrying the question type.
pub const QUESTION_TYPE_ATTR: &str = "data-type";

/// Attribute on an answer item carrying its 0-based position.
pub const ANSWER_POSITION_ATTR: &str = "data-pos";

/// `data-type` value of single-answer questions.
pub const SINGLE_TYPE_MARKER: &str = "single";

/// `data-type` value of multi-answer questions.
pub const MULTIPLE_TYPE_MARKER: &str = "multiple";

/// Tags stripped from answer labels before their text is read.
pub const INPUT_CONTROL_TAGS: &[&str] = &["input"];

/// Separator between explanation fragments.
pub const EXPLANATION_SEPARATOR: &str = " | ";

/// Number of answer/explanation column pairs in the export.
pub const EXPORT_ANSWER_SLOTS: usize = 6;

/// Suffix appended to the input file stem for the default output path.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_udemy_questions.csv";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default maximum size of a downloaded quiz page in bytes (50 MB).
pub const DEFAULT_MAX_DOCUMENT_SIZE: u64 = 50 * 1024 * 1024;

/// Whether an input argument names a remote document.
///
/// # Examples
/// ```
/// use quizport_converter::config::is_remote_source;
///
/// assert!(is_remote_source("https://example.com/quiz/"));
/// assert!(!is_remote_source("quiz.html"));
/// ```
pub fn is_remote_source(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Default output path for a local input file: `<stem>_udemy_questions.csv`
/// in the same directory.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use quizport_converter::config::default_output_path;
///
/// assert_eq!(
///     default_output_path(Path::new("exports/quiz.html")),
///     Path::new("exports/quiz_udemy_questions.csv")
/// );
/// ```
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "quiz".to_string());
    input.with_file_name(format!("{stem}{DEFAULT_OUTPUT_SUFFIX}"))
}

/// Default output file name for a remote input, derived from the last
/// non-empty URL path segment.
///
/// # Examples
/// ```
/// use quizport_converter::config::default_output_for_url;
///
/// assert_eq!(
///     default_output_for_url("https://example.com/quizzes/practice-test-1/"),
///     std::path::PathBuf::from("practice-test-1_udemy_questions.csv")
/// );
/// ```
pub fn default_output_for_url(url: &str) -> PathBuf {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let path = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);
    let stem = path
        .split('/')
        .skip(1)
        .filter(|segment| !segment.is_empty())
        .last()
        .map(|segment| {
            segment
                .rsplit_once('.')
                .map_or(segment, |(name, _)| name)
                .to_string()
        })
        .unwrap_or_else(|| "quiz".to_string());
    PathBuf::from(format!("{stem}{DEFAULT_OUTPUT_SUFFIX}"))
}
