//! Whitespace and entity normalization for text pulled out of markup.

use regex::Regex;
use std::sync::LazyLock;

/// Non-breaking-space entity that survives in some exported quiz pages.
const NBSP_ENTITY: &str = "&nbsp;";

/// Any run of whitespace, Unicode-aware (covers U+00A0 as well).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize text extracted from markup.
///
/// Replaces the literal `&nbsp;` entity with a space, collapses every
/// whitespace run to a single space and trims both ends. Empty input gives
/// an empty string.
///
/// The entity is replaced before collapsing, so the result never contains a
/// whitespace run and `clean_text(clean_text(t)) == clean_text(t)`.
///
/// # Examples
/// ```
/// use quizport_shared::clean_text;
///
/// assert_eq!(clean_text("a &nbsp; b"), "a b");
/// assert_eq!(clean_text(""), "");
/// ```
pub fn clean_text(text: &str) -> String {
    let replaced = text.replace(NBSP_ENTITY, " ");
    WHITESPACE_RUN
        .replace_all(replaced.trim(), " ")
        .trim()
        .to_string()
}

/// Number of whitespace-separated words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
