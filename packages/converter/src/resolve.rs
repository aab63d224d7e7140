//! Correct-answer resolution.
//!
//! Single-answer questions carry a structural marker on the correct answer
//! item. Multi-answer exports only state the answers in prose
//! ("Correct answers: A, C"), so those are recovered with pattern matching
//! and a fallback policy keeps every question importable. Questions whose
//! answers came from the fallback are flagged for review.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{
    ANSWER_ITEM_CLASS, ANSWER_POSITION_ATTR, CORRECT_ANSWER_CLASS, EXPLANATION_CLASS,
    EXPORT_ANSWER_SLOTS,
};
use crate::markup::{block_text_content, find_all, find_first, has_class, MarkupNode};
use crate::types::{AnswerSource, Diagnostic, DiagnosticKind, ExtractedQuestion, QuestionType};

/// Letter-list forms after "Correct answer(s):", in preference order:
/// comma separated, "and" joined, space separated.
///
/// Lower-case letters are accepted in the comma and "and" forms. The
/// space-separated form stays upper-case, otherwise a following sentence
/// starting with the article "a" would extend the list.
#[allow(clippy::expect_used)] // Static regexes that are guaranteed to be valid
static ANSWER_LETTER_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r"(?i:correct\s+answers?)\s*:\s*([A-Za-z]\b(?:\s*,\s*[A-Za-z]\b)*)",
        r"(?i:correct\s+answers?)\s*:\s*([A-Za-z]\b(?:\s+(?i:and)\s+[A-Za-z]\b)*)",
        r"(?i:correct\s+answers?)\s*:\s*([A-Z]\b(?:\s*[A-Z]\b)*)",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
});

/// Position of the answer item carrying the correct-answer class.
///
/// The 0-based `data-pos` attribute is used when it parses, otherwise the
/// item's index among the answer items. Only the first marked item counts.
pub fn structural_correct_position<N: MarkupNode>(item: &N) -> Option<usize> {
    find_all(item, "li", Some(ANSWER_ITEM_CLASS))
        .iter()
        .enumerate()
        .find(|(_, answer)| has_class(*answer, CORRECT_ANSWER_CLASS))
        .map(|(index, answer)| {
            answer
                .attribute(ANSWER_POSITION_ATTR)
                .and_then(|pos| pos.trim().parse::<usize>().ok())
                .unwrap_or(index)
                + 1
        })
}

/// Answer positions stated in explanation prose.
///
/// Each of the three letter-list forms is tried and the one capturing the
/// longest list wins, earlier forms winning ties. Letters map to positions
/// as `A = 1, B = 2, ...`, deduplicated in first-seen order.
///
/// This assumes the letters follow document order, i.e. that `A` names the
/// first answer item. Nothing in the markup ties letters to items, so a
/// page that shuffles answers after lettering them yields wrong positions.
///
/// # Examples
/// ```
/// use quizport_converter::resolve::letters_to_positions;
///
/// assert_eq!(letters_to_positions("Correct answers: A, C"), vec![1, 3]);
/// assert_eq!(letters_to_positions("correct answer: B and D."), vec![2, 4]);
/// assert_eq!(letters_to_positions("Correct Answers: C A"), vec![3, 1]);
/// assert_eq!(letters_to_positions("Correct answers: b, d"), vec![2, 4]);
/// assert!(letters_to_positions("No hint here").is_empty());
/// ```
pub fn letters_to_positions(explanation: &str) -> Vec<usize> {
    let Some(span) = ANSWER_LETTER_PATTERNS
        .iter()
        .filter_map(|pattern| pattern.captures(explanation))
        .filter_map(|captures| captures.get(1))
        .map(|group| group.as_str())
        .fold(None::<&str>, |best, span| match best {
            Some(best) if best.len() >= span.len() => Some(best),
            _ => Some(span),
        })
    else {
        return Vec::new();
    };

    let mut positions = Vec::new();
    for token in span
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty() && !token.eq_ignore_ascii_case("and"))
    {
        for letter in token.chars().filter(char::is_ascii_alphabetic) {
            let position = usize::from(letter.to_ascii_uppercase() as u8 - b'A') + 1;
            if !positions.contains(&position) {
                positions.push(position);
            }
        }
    }
    positions
}

/// Apply the fallback policy to a detected answer set.
///
/// Nothing detected yields `{1}`, or `{1, 2}` for multi-answer questions. A
/// multi-answer question with one detected position gets a second one: `2`
/// when the found position is `1`, otherwise `1`.
///
/// # Examples
/// ```
/// use quizport_converter::resolve::apply_fallback;
/// use quizport_converter::{AnswerSource, QuestionType};
///
/// assert_eq!(
///     apply_fallback(QuestionType::MultiAnswer, vec![3], AnswerSource::ExplanationText),
///     (vec![3, 1], AnswerSource::Augmented)
/// );
/// assert_eq!(
///     apply_fallback(QuestionType::SingleAnswer, vec![], AnswerSource::Structural),
///     (vec![1], AnswerSource::Defaulted)
/// );
/// ```
pub fn apply_fallback(
    question_type: QuestionType,
    mut found: Vec<usize>,
    detected_by: AnswerSource,
) -> (Vec<usize>, AnswerSource) {
    match (found.len(), question_type.requires_multiple_answers()) {
        (0, false) => (vec![1], AnswerSource::Defaulted),
        (0, true) => (vec![1, 2], AnswerSource::Defaulted),
        (1, true) => {
            found.push(if found[0] == 1 { 2 } else { 1 });
            (found, AnswerSource::Augmented)
        }
        _ => (found, detected_by),
    }
}

/// Resolve the correct answers of `question` from its quiz item markup.
///
/// Single-answer and unknown questions use the structural marker,
/// multi-answer questions the explanation text. Fallbacks and letters that
/// point past the last answer are reported in `diagnostics`.
pub fn resolve_correct_answers<N: MarkupNode>(
    question: &mut ExtractedQuestion,
    item: &N,
    item_index: usize,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let (found, detected_by) = if question.question_type.requires_multiple_answers() {
        let explanation = find_first(item, "div", Some(EXPLANATION_CLASS))
            .map(|div| block_text_content(&div))
            .unwrap_or_default();
        let positions = letters_to_positions(&explanation);
        for &position in positions.iter().filter(|&&p| p > question.answers.len()) {
            tracing::warn!(
                item = item_index,
                position,
                answers = question.answers.len(),
                "answer letter points past the last answer"
            );
            diagnostics.push(Diagnostic {
                item: item_index,
                kind: DiagnosticKind::AnswerLetterOutOfRange,
                message: format!(
                    "answer letter {} refers to position {position} but only {} answers exist",
                    position_letter(position),
                    question.answers.len()
                ),
            });
        }
        (positions, AnswerSource::ExplanationText)
    } else {
        (
            structural_correct_position(item).into_iter().collect(),
            AnswerSource::Structural,
        )
    };

    let found_count = found.len();
    let (positions, source) = apply_fallback(question.question_type, found, detected_by);
    match source {
        AnswerSource::Defaulted => {
            tracing::warn!(
                item = item_index,
                ?positions,
                "no correct answers found, using default"
            );
            diagnostics.push(Diagnostic {
                item: item_index,
                kind: DiagnosticKind::CorrectAnswersDefaulted,
                message: format!(
                    "no correct answers found for {} question, defaulted to {}",
                    question.question_type,
                    join_positions(&positions)
                ),
            });
        }
        AnswerSource::Augmented => {
            tracing::warn!(
                item = item_index,
                ?positions,
                "only one correct answer found, added a second"
            );
            diagnostics.push(Diagnostic {
                item: item_index,
                kind: DiagnosticKind::CorrectAnswersAugmented,
                message: format!(
                    "multi answer question had {found_count} correct answer, extended to {}",
                    join_positions(&positions)
                ),
            });
        }
        AnswerSource::Structural | AnswerSource::ExplanationText => {
            tracing::debug!(
                item = item_index,
                ?positions,
                ?source,
                "resolved correct answers"
            );
        }
    }
    question.set_correct_answers(positions, source);
    flag_unexportable_answers(question, item_index, diagnostics);
}

/// Flag a question whose correct set does not survive the export layout.
///
/// Positions past the last export slot are dropped on export, which can
/// leave a single-answer question with nothing or a multi-answer question
/// with fewer than two answers.
fn flag_unexportable_answers(
    question: &mut ExtractedQuestion,
    item_index: usize,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let required = if question.question_type.requires_multiple_answers() {
        2
    } else {
        1
    };
    let exportable = question
        .correct_answers
        .iter()
        .filter(|&&position| position <= EXPORT_ANSWER_SLOTS)
        .count();
    if exportable >= required {
        return;
    }

    tracing::warn!(
        item = item_index,
        positions = ?question.correct_answers,
        "correct answers do not fit the export slots"
    );
    diagnostics.push(Diagnostic {
        item: item_index,
        kind: DiagnosticKind::CorrectAnswersNotExportable,
        message: format!(
            "correct answers {} include positions past slot {EXPORT_ANSWER_SLOTS}, only {exportable} can be exported",
            join_positions(&question.correct_answers)
        ),
    });
    question.was_defaulted = true;
}

fn position_letter(position: usize) -> char {
    u8::try_from(position - 1)
        .ok()
        .and_then(|offset| b'A'.checked_add(offset))
        .map_or('?', char::from)
}

fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
