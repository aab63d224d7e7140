//! Narrow document-tree interface used by the extractor.
//!
//! The extractor only needs tag names, attributes, element/text children
//! and text extraction, so it is written against [`MarkupNode`] instead of a
//! specific parser. Two backends are provided: [`HtmlDocument`] (lenient
//! HTML5 parsing) and [`XhtmlDocument`] (strict XML parsing).

mod html;
mod xhtml;

pub use html::{HtmlDocument, HtmlNode};
pub use xhtml::{XhtmlDocument, XhtmlNode};

use quizport_shared::clean_text;

/// Elements that start a new line of text when rendered.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "li",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

/// A child of a markup element.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupChild<N> {
    /// Nested element.
    Element(N),
    /// Character data, entities already decoded.
    Text(String),
}

/// An element of a parsed document.
pub trait MarkupNode: Clone {
    /// Local tag name of the element.
    fn tag_name(&self) -> &str;

    /// Value of an attribute, if present.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Element and text children in document order.
    fn children(&self) -> Vec<MarkupChild<Self>>;
}

/// Whether the element's tag name equals `tag` (ASCII case-insensitive).
pub fn is_tag<N: MarkupNode>(node: &N, tag: &str) -> bool {
    node.tag_name().eq_ignore_ascii_case(tag)
}

/// Whether the element's `class` attribute contains `class` as a
/// whitespace-separated token.
///
/// # Examples
/// ```
/// use quizport_converter::markup::{has_class, HtmlDocument};
///
/// let doc = HtmlDocument::parse(r#"<div class="a wpProQuiz_response b"></div>"#);
/// let div = quizport_converter::markup::find_first(&doc.root(), "div", None).unwrap();
/// assert!(has_class(&div, "wpProQuiz_response"));
/// assert!(!has_class(&div, "wpProQuiz"));
/// ```
pub fn has_class<N: MarkupNode>(node: &N, class: &str) -> bool {
    node.attribute("class")
        .is_some_and(|classes| classes.split_whitespace().any(|token| token == class))
}

/// All descendant elements of `node` in document order, excluding `node`.
pub fn descendants<N: MarkupNode>(node: &N) -> Vec<N> {
    let mut found = Vec::new();
    collect_descendants(node, &mut found);
    found
}

fn collect_descendants<N: MarkupNode>(node: &N, found: &mut Vec<N>) {
    for child in node.children() {
        if let MarkupChild::Element(element) = child {
            found.push(element.clone());
            collect_descendants(&element, found);
        }
    }
}

/// Descendant elements with the given tag and, if given, class token.
pub fn find_all<N: MarkupNode>(node: &N, tag: &str, class: Option<&str>) -> Vec<N> {
    descendants(node)
        .into_iter()
        .filter(|element| matches_selector(element, tag, class))
        .collect()
}

/// First descendant element with the given tag and, if given, class token.
pub fn find_first<N: MarkupNode>(node: &N, tag: &str, class: Option<&str>) -> Option<N> {
    for child in node.children() {
        if let MarkupChild::Element(element) = child {
            if matches_selector(&element, tag, class) {
                return Some(element);
            }
            if let Some(found) = find_first(&element, tag, class) {
                return Some(found);
            }
        }
    }
    None
}

fn matches_selector<N: MarkupNode>(node: &N, tag: &str, class: Option<&str>) -> bool {
    is_tag(node, tag) && class.is_none_or(|class| has_class(node, class))
}

/// Concatenated text of all descendant text nodes, unnormalized.
pub fn text_content<N: MarkupNode>(node: &N) -> String {
    text_content_excluding(node, &[])
}

/// Like [`text_content`], skipping subtrees rooted at any of `tags`.
///
/// Used to read answer labels without the text of embedded input controls.
pub fn text_content_excluding<N: MarkupNode>(node: &N, tags: &[&str]) -> String {
    let mut text = String::new();
    push_text(node, tags, &mut text);
    text
}

/// Text content with block elements kept apart by whitespace.
///
/// Inline elements are concatenated like [`text_content`], so a label split
/// by `<strong>` still reads as one phrase, while adjacent blocks stay
/// separate (`<p>A, C</p><p>Because</p>` reads `"A, C Because"`).
/// Whitespace runs are collapsed and the result is trimmed.
pub fn block_text_content<N: MarkupNode>(node: &N) -> String {
    let mut text = String::new();
    push_block_text(node, &mut text);
    clean_text(&text)
}

fn push_block_text<N: MarkupNode>(node: &N, text: &mut String) {
    for child in node.children() {
        match child {
            MarkupChild::Text(fragment) => text.push_str(&fragment),
            MarkupChild::Element(element) => {
                let block = BLOCK_TAGS.iter().any(|tag| is_tag(&element, tag));
                if block {
                    text.push(' ');
                }
                push_block_text(&element, text);
                if block {
                    text.push(' ');
                }
            }
        }
    }
}

fn push_text<N: MarkupNode>(node: &N, excluded: &[&str], out: &mut String) {
    for child in node.children() {
        match child {
            MarkupChild::Text(text) => out.push_str(&text),
            MarkupChild::Element(element) => {
                if !excluded.iter().any(|tag| is_tag(&element, tag)) {
                    push_text(&element, excluded, out);
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory tree for exercising the extractor without a parser.

    use super::{MarkupChild, MarkupNode};

    #[derive(Debug, Clone, PartialEq)]
    pub struct TestNode {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<MarkupChild<TestNode>>,
    }

    impl TestNode {
        pub fn new(tag: &str) -> Self {
            Self {
                tag: tag.to_string(),
                attributes: Vec::new(),
                children: Vec::new(),
            }
        }

        pub fn attr(mut self, name: &str, value: &str) -> Self {
            self.attributes.push((name.to_string(), value.to_string()));
            self
        }

        pub fn class(self, value: &str) -> Self {
            self.attr("class", value)
        }

        pub fn child(mut self, child: TestNode) -> Self {
            self.children.push(MarkupChild::Element(child));
            self
        }

        pub fn text(mut self, text: &str) -> Self {
            self.children.push(MarkupChild::Text(text.to_string()));
            self
        }
    }

    impl MarkupNode for TestNode {
        fn tag_name(&self) -> &str {
            &self.tag
        }

        fn attribute(&self, name: &str) -> Option<&str> {
            self.attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        }

        fn children(&self) -> Vec<MarkupChild<Self>> {
            self.children.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::TestNode;
    use super::*;

    fn sample() -> TestNode {
        TestNode::new("div")
            .child(
                TestNode::new("P")
                    .class("first note")
                    .text("Hello ")
                    .child(TestNode::new("input").attr("type", "radio").text("X"))
                    .text("world"),
            )
            .child(TestNode::new("p").class("note").text("Second"))
    }

    #[test]
    fn test_has_class_matches_tokens() {
        let p = TestNode::new("p").class("wpProQuiz_listItem extra");
        assert!(has_class(&p, "wpProQuiz_listItem"));
        assert!(has_class(&p, "extra"));
        assert!(!has_class(&p, "wpProQuiz"));
        assert!(!has_class(&TestNode::new("p"), "extra"));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let tags: Vec<String> = descendants(&sample())
            .iter()
            .map(|n| n.tag_name().to_string())
            .collect();
        assert_eq!(tags, vec!["P", "input", "p"]);
    }

    #[test]
    fn test_find_all_and_first_are_case_insensitive_on_tags() {
        let root = sample();
        assert_eq!(find_all(&root, "p", None).len(), 2);
        assert_eq!(find_all(&root, "p", Some("first")).len(), 1);
        let first = find_first(&root, "p", Some("note")).unwrap();
        assert!(has_class(&first, "first"));
        assert!(find_first(&root, "ul", None).is_none());
    }

    #[test]
    fn test_text_content_excluding_skips_controls() {
        let root = sample();
        assert_eq!(text_content(&root), "Hello XworldSecond");
        assert_eq!(
            text_content_excluding(&root, &["INPUT"]),
            "Hello worldSecond"
        );
    }

    #[test]
    fn test_block_text_content_separates_blocks() {
        let root = TestNode::new("div")
            .child(TestNode::new("p").text("Correct answers: A, C"))
            .child(TestNode::new("p").text("Because"));
        assert_eq!(block_text_content(&root), "Correct answers: A, C Because");
    }

    #[test]
    fn test_block_text_content_joins_inline_elements() {
        let root = TestNode::new("div").child(
            TestNode::new("p")
                .child(TestNode::new("strong").text("Correct"))
                .text(" answers")
                .child(TestNode::new("em").text(":"))
                .text(" B, D"),
        );
        assert_eq!(block_text_content(&root), "Correct answers: B, D");

        let line_break = TestNode::new("p")
            .text("Correct answers: A")
            .child(TestNode::new("br"))
            .text("Both scale");
        assert_eq!(
            block_text_content(&line_break),
            "Correct answers: A Both scale"
        );
    }
}
