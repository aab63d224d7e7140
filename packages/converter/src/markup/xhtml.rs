//! Strict XHTML backend built on `roxmltree`.

use roxmltree::{Document, Node, ParsingOptions};

use super::{MarkupChild, MarkupNode};
use crate::error::Result;

/// A well-formed XHTML document.
///
/// Unlike [`HtmlDocument`](super::HtmlDocument) this rejects malformed
/// input, which makes it the backend to use when a broken export should
/// abort the run instead of yielding a partial result.
#[derive(Debug)]
pub struct XhtmlDocument<'input> {
    doc: Document<'input>,
}

impl<'input> XhtmlDocument<'input> {
    /// Parse XHTML, allowing a DOCTYPE declaration.
    ///
    /// # Errors
    /// Returns `ConverterError::MarkupParse` if the input is not well-formed.
    pub fn parse(source: &'input str) -> Result<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(source, options)?;
        Ok(Self { doc })
    }

    /// The document element.
    pub fn root(&self) -> XhtmlNode<'_, 'input> {
        XhtmlNode(self.doc.root_element())
    }
}

/// An element of an [`XhtmlDocument`].
#[derive(Debug, Clone, Copy)]
pub struct XhtmlNode<'a, 'input>(Node<'a, 'input>);

impl MarkupNode for XhtmlNode<'_, '_> {
    fn tag_name(&self) -> &str {
        self.0.tag_name().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.0.attribute(name)
    }

    fn children(&self) -> Vec<MarkupChild<Self>> {
        self.0
            .children()
            .filter_map(|child| {
                if child.is_element() {
                    Some(MarkupChild::Element(XhtmlNode(child)))
                } else if child.is_text() {
                    child.text().map(|text| MarkupChild::Text(text.to_string()))
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConverterError;
    use crate::markup::{find_all, text_content};

    #[test]
    fn test_parse_well_formed() {
        let source = r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml"><body>
<ul><li class="a">One</li><li class="a b">Two</li></ul>
</body></html>"#;
        let doc = XhtmlDocument::parse(source).unwrap();
        let items = find_all(&doc.root(), "li", Some("a"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].tag_name(), "li");
        assert_eq!(text_content(&items[1]), "Two");
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        let err = XhtmlDocument::parse("<html><body><p>open</body></html>").unwrap_err();
        assert!(matches!(err, ConverterError::MarkupParse(_)));
    }
}
