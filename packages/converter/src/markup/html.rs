//! Lenient HTML5 backend built on `scraper`.

use scraper::{ElementRef, Html, Node};

use super::{MarkupChild, MarkupNode};

/// A leniently parsed HTML document.
///
/// HTML5 parsing recovers from any input, so construction cannot fail.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document (or a fragment, which gets wrapped).
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The `<html>` element.
    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode(self.html.root_element())
    }
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument").finish_non_exhaustive()
    }
}

/// An element of an [`HtmlDocument`].
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl MarkupNode for HtmlNode<'_> {
    fn tag_name(&self) -> &str {
        self.0.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn children(&self) -> Vec<MarkupChild<Self>> {
        self.0
            .children()
            .filter_map(|child| match child.value() {
                Node::Element(_) => {
                    ElementRef::wrap(child).map(|e| MarkupChild::Element(HtmlNode(e)))
                }
                Node::Text(text) => Some(MarkupChild::Text(String::from(&**text))),
                _ => None,
            })
            .collect()
    }
}
