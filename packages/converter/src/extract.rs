//! Quiz item extraction.
//!
//! Walks a parsed document, turns every quiz item with question text into an
//! [`ExtractedQuestion`] and resolves its correct answers. Skips and
//! fallbacks are recorded as diagnostics on the returned report.

use quizport_shared::clean_text;

use crate::config::{
    ANSWER_ITEM_CLASS, ANSWER_LIST_CLASS, EXPLANATION_CLASS, EXPLANATION_SEPARATOR,
    INPUT_CONTROL_TAGS, QUESTION_TEXT_CLASS, QUESTION_TYPE_ATTR, QUIZ_ITEM_CLASS,
};
use crate::error::Result;
use crate::markup::{
    find_all, find_first, text_content, text_content_excluding, HtmlDocument, MarkupNode,
    XhtmlDocument,
};
use crate::resolve::resolve_correct_answers;
use crate::types::{Diagnostic, DiagnosticKind, ExtractedQuestion, ExtractionReport, QuestionType};

/// Extract and resolve every quiz item below `root`.
pub fn extract_questions<N: MarkupNode>(root: &N) -> ExtractionReport {
    let items = find_all(root, "li", Some(QUIZ_ITEM_CLASS));
    tracing::info!(items = items.len(), "found quiz items");

    let mut report = ExtractionReport {
        items_found: items.len(),
        ..ExtractionReport::default()
    };

    for (index, item) in (1..).zip(items.iter()) {
        let Some(mut question) = extract_item(item, index, &mut report.diagnostics) else {
            report.skipped += 1;
            continue;
        };
        resolve_correct_answers(&mut question, item, index, &mut report.diagnostics);
        tracing::debug!(
            item = index,
            question_type = %question.question_type,
            answers = question.answers.len(),
            correct = ?question.correct_answers,
            "extracted question"
        );
        report.questions.push(question);
    }

    if report.questions.is_empty() {
        tracing::warn!(items = report.items_found, "no questions found in document");
    }
    report
}

/// Extract from leniently parsed HTML.
///
/// # Examples
/// ```
/// use quizport_converter::extract_html;
///
/// let report = extract_html("<p>nothing here</p>");
/// assert!(report.questions.is_empty());
/// ```
pub fn extract_html(source: &str) -> ExtractionReport {
    let document = HtmlDocument::parse(source);
    extract_questions(&document.root())
}

/// Extract from strictly parsed XHTML.
///
/// # Errors
/// Returns `ConverterError::MarkupParse` if the document is not well-formed.
pub fn extract_xhtml(source: &str) -> Result<ExtractionReport> {
    let document = XhtmlDocument::parse(source)?;
    Ok(extract_questions(&document.root()))
}

/// Build the unresolved question of one quiz item.
///
/// Returns `None`, with a diagnostic, when the item has no question text.
pub fn extract_item<N: MarkupNode>(
    item: &N,
    item_index: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<ExtractedQuestion> {
    let question_text = find_first(item, "div", Some(QUESTION_TEXT_CLASS))
        .map(|div| clean_text(&text_content(&div)))
        .unwrap_or_default();
    if question_text.is_empty() {
        tracing::warn!(
            item = item_index,
            "skipping quiz item without question text"
        );
        diagnostics.push(Diagnostic {
            item: item_index,
            kind: DiagnosticKind::SkippedNoQuestionText,
            message: "skipped: no question text found".to_string(),
        });
        return None;
    }

    let marker = find_first(item, "ul", Some(ANSWER_LIST_CLASS))
        .and_then(|list| list.attribute(QUESTION_TYPE_ATTR).map(str::to_string));
    let question_type = QuestionType::from_marker(marker.as_deref());
    if question_type == QuestionType::Unknown {
        let described = marker.map_or_else(|| "missing".to_string(), |m| format!("'{m}'"));
        tracing::warn!(
            item = item_index,
            marker = %described,
            "unrecognised question type"
        );
        diagnostics.push(Diagnostic {
            item: item_index,
            kind: DiagnosticKind::UnknownQuestionType,
            message: format!(
                "question type marker {described} not recognised, exported as multi-select"
            ),
        });
    }

    let mut question = ExtractedQuestion::new(question_text, question_type);
    for answer_item in find_all(item, "li", Some(ANSWER_ITEM_CLASS)) {
        let text = match find_first(&answer_item, "label", None) {
            Some(label) => clean_text(&text_content_excluding(&label, INPUT_CONTROL_TAGS)),
            None => {
                let position = question.answers.len() + 1;
                tracing::warn!(item = item_index, position, "answer without label");
                diagnostics.push(Diagnostic {
                    item: item_index,
                    kind: DiagnosticKind::MissingAnswerLabel,
                    message: format!("answer {position} has no label, kept with empty text"),
                });
                String::new()
            }
        };
        question = question.with_answer(text);
    }

    if let Some(explanation) = find_first(item, "div", Some(EXPLANATION_CLASS)) {
        question = question
            .with_explanation(explanation_fragments(&explanation).join(EXPLANATION_SEPARATOR));
    }

    Some(question)
}

/// Fragments of an explanation container, in document order.
///
/// For every paragraph: its normalised text (if any), then one
/// `Image (alt): src` / `Image: src` line per image, then one `text: url` /
/// `url` line per link.
pub fn explanation_fragments<N: MarkupNode>(explanation: &N) -> Vec<String> {
    let mut fragments = Vec::new();
    for paragraph in find_all(explanation, "p", None) {
        let text = clean_text(&text_content(&paragraph));
        if !text.is_empty() {
            fragments.push(text);
        }

        for image in find_all(&paragraph, "img", None) {
            let Some(src) = image.attribute("src").filter(|src| !src.is_empty()) else {
                continue;
            };
            let alt = image.attribute("alt").map(clean_text).unwrap_or_default();
            fragments.push(if alt.is_empty() {
                format!("Image: {src}")
            } else {
                format!("Image ({alt}): {src}")
            });
        }

        for link in find_all(&paragraph, "a", None) {
            let Some(href) = link.attribute("href").filter(|href| !href.is_empty()) else {
                continue;
            };
            let link_text = clean_text(&text_content(&link));
            fragments.push(if link_text.is_empty() {
                href.to_string()
            } else {
                format!("{link_text}: {href}")
            });
        }
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::testing::TestNode;
    use crate::types::{AnswerSource, ExtractionStatus};
    use pretty_assertions::assert_eq;

    fn question_text(text: &str) -> TestNode {
        TestNode::new("div")
            .class("wpProQuiz_question_text")
            .text(text)
    }

    fn answer(pos: usize, label: &str, correct: bool) -> TestNode {
        let class = if correct {
            "wpProQuiz_questionListItem wpProQuiz_answerCorrect"
        } else {
            "wpProQuiz_questionListItem"
        };
        TestNode::new("li")
            .class(class)
            .attr("data-pos", &pos.to_string())
            .child(
                TestNode::new("label")
                    .child(TestNode::new("input").attr("type", "radio").text("ignored"))
                    .text(label),
            )
    }

    fn quiz_item(children: Vec<TestNode>) -> TestNode {
        children
            .into_iter()
            .fold(
                TestNode::new("li").class("wpProQuiz_listItem"),
                TestNode::child,
            )
    }

    fn answer_list(data_type: &str, answers: Vec<TestNode>) -> TestNode {
        answers.into_iter().fold(
            TestNode::new("ul")
                .class("wpProQuiz_questionList")
                .attr("data-type", data_type),
            TestNode::child,
        )
    }

    fn document(items: Vec<TestNode>) -> TestNode {
        let list = items
            .into_iter()
            .fold(TestNode::new("ol").class("wpProQuiz_list"), TestNode::child);
        TestNode::new("html").child(TestNode::new("body").child(list))
    }

    #[test]
    fn test_blank_question_is_skipped() {
        let root = document(vec![
            quiz_item(vec![question_text("   \n ")]),
            quiz_item(vec![question_text("What is X?")]),
        ]);
        let report = extract_questions(&root);
        assert_eq!(report.items_found, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.questions[0].question_text, "What is X?");
        assert_eq!(
            report
                .diagnostics_of(DiagnosticKind::SkippedNoQuestionText)
                .count(),
            1
        );
    }

    #[test]
    fn test_single_answer_item() {
        let root = document(vec![quiz_item(vec![
            question_text("  Which   service? "),
            answer_list(
                "single",
                vec![
                    answer(0, " Cloud Run ", false),
                    answer(1, "GKE", true),
                    answer(2, "Compute Engine", false),
                ],
            ),
        ])]);
        let report = extract_questions(&root);
        let question = &report.questions[0];
        assert_eq!(question.question_text, "Which service?");
        assert_eq!(question.question_type, QuestionType::SingleAnswer);
        let labels: Vec<&str> = question.answers.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(labels, vec!["Cloud Run", "GKE", "Compute Engine"]);
        assert_eq!(question.correct_answers, vec![2]);
        assert_eq!(question.answer_source, AnswerSource::Structural);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_type_is_reported() {
        let root = document(vec![quiz_item(vec![
            question_text("Sort these"),
            answer_list("sort_answer", vec![answer(0, "a", false)]),
        ])]);
        let report = extract_questions(&root);
        assert_eq!(report.questions[0].question_type, QuestionType::Unknown);
        let kinds: Vec<DiagnosticKind> = report.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UnknownQuestionType,
                DiagnosticKind::CorrectAnswersDefaulted
            ]
        );
    }

    #[test]
    fn test_missing_label_keeps_position() {
        let unlabeled = TestNode::new("li")
            .class("wpProQuiz_questionListItem")
            .attr("data-pos", "1");
        let root = document(vec![quiz_item(vec![
            question_text("Q"),
            answer_list(
                "single",
                vec![
                    answer(0, "first", false),
                    unlabeled,
                    answer(2, "third", true),
                ],
            ),
        ])]);
        let report = extract_questions(&root);
        let question = &report.questions[0];
        assert_eq!(question.answers.len(), 3);
        assert_eq!(question.answers[1].text, "");
        assert_eq!(question.answers[2].position, 3);
        assert_eq!(question.correct_answers, vec![3]);
        assert_eq!(
            report
                .diagnostics_of(DiagnosticKind::MissingAnswerLabel)
                .count(),
            1
        );
    }

    #[test]
    fn test_explanation_fragments_order() {
        let explanation = TestNode::new("div")
            .class("wpProQuiz_response")
            .child(
                TestNode::new("p")
                    .text("See ")
                    .child(
                        TestNode::new("a")
                            .attr("href", "https://cloud.google.com/run")
                            .text("Cloud Run docs"),
                    )
                    .child(
                        TestNode::new("img")
                            .attr("src", "https://example.com/a.png")
                            .attr("alt", "diagram"),
                    ),
            )
            .child(
                TestNode::new("p")
                    .child(TestNode::new("a").attr("href", "https://example.com/x"))
                    .child(TestNode::new("img").attr("src", "b.png")),
            )
            .child(TestNode::new("p").child(TestNode::new("a").text("no href")));

        assert_eq!(
            explanation_fragments(&explanation),
            vec![
                "See Cloud Run docs",
                "Image (diagram): https://example.com/a.png",
                "Cloud Run docs: https://cloud.google.com/run",
                "Image: b.png",
                "https://example.com/x",
                "no href",
            ]
        );
    }

    #[test]
    fn test_overall_explanation_joined() {
        let root = document(vec![quiz_item(vec![
            question_text("Q"),
            answer_list("single", vec![answer(0, "a", true)]),
            TestNode::new("div")
                .class("wpProQuiz_response")
                .child(TestNode::new("p").text("First."))
                .child(TestNode::new("p").text(""))
                .child(TestNode::new("p").text("Second.")),
        ])]);
        let report = extract_questions(&root);
        assert_eq!(report.questions[0].explanation, "First. | Second.");
    }

    #[test]
    fn test_empty_document() {
        let report = extract_questions(&document(vec![]));
        assert_eq!(report.status(), ExtractionStatus::NoQuestionsFound);
        assert_eq!(report.items_found, 0);
    }

    #[test]
    fn test_extract_html_strips_input_controls() {
        let html = r#"<ul><li class="wpProQuiz_listItem">
            <div class="wpProQuiz_question_text"><p>Pick&nbsp;one</p></div>
            <ul class="wpProQuiz_questionList" data-type="single">
              <li class="wpProQuiz_questionListItem" data-pos="0">
                <label><input type="radio" value="1"> Yes</label>
              </li>
            </ul>
        </li></ul>"#;
        let report = extract_html(html);
        assert_eq!(report.questions[0].question_text, "Pick one");
        assert_eq!(report.questions[0].answers[0].text, "Yes");
    }

    fn multi_answer_page(explanation: &str) -> String {
        let answers: String = (0..4)
            .map(|pos| {
                format!(
                    r#"<li class="wpProQuiz_questionListItem" data-pos="{pos}"><label><input type="checkbox"> Option {pos}</label></li>"#
                )
            })
            .collect();
        format!(
            r#"<ol><li class="wpProQuiz_listItem">
            <div class="wpProQuiz_question_text">Which two?</div>
            <ul class="wpProQuiz_questionList" data-type="multiple">{answers}</ul>
            <div class="wpProQuiz_response">{explanation}</div>
        </li></ol>"#
        )
    }

    #[test]
    fn test_answer_hint_survives_inline_markup() {
        for explanation in [
            "<p>Correct answers: B, D</p>",
            "<p><strong>Correct answers</strong>: B, D</p>",
            "<p><strong>Correct</strong> answers: B, D</p>",
            "<p><b>Correct answers:</b> <em>B</em>, <em>D</em></p>",
            "<p>Correct answers: B and D</p><p>Both scale to zero.</p>",
        ] {
            let report = extract_html(&multi_answer_page(explanation));
            let question = &report.questions[0];
            assert_eq!(question.correct_answers, vec![2, 4], "{explanation}");
            assert_eq!(
                question.answer_source,
                AnswerSource::ExplanationText,
                "{explanation}"
            );
            assert!(!question.was_defaulted, "{explanation}");
        }
    }

    #[test]
    fn test_answer_hint_with_lowercase_letters() {
        let report = extract_html(&multi_answer_page("<p>Correct answers: b, d</p>"));
        assert_eq!(report.questions[0].correct_answers, vec![2, 4]);
        assert_eq!(
            report.questions[0].answer_source,
            AnswerSource::ExplanationText
        );

        let report = extract_html(&multi_answer_page("<p>Correct answers: a and c</p>"));
        assert_eq!(report.questions[0].correct_answers, vec![1, 3]);
    }

    #[test]
    fn test_extract_xhtml_rejects_malformed() {
        assert!(extract_xhtml("<ul><li class=\"wpProQuiz_listItem\"></ul>").is_err());
    }
}
