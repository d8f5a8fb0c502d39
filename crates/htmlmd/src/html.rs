//! HTML parsing support.
//!
//! This module parses HTML strings with scraper (html5ever underneath) and
//! converts the result to the Node structure used by the converter.

use scraper::node::Element;
use scraper::{Html, Node as ScraperNode};

use crate::node::{ElementNode, Node};

/// Parse an HTML document into a Node tree.
///
/// The parser never fails: unclosed tags are closed, stray closing tags are
/// dropped and the usual `html`/`head`/`body` scaffolding is synthesised.
/// Comments, doctypes and processing instructions are discarded.
///
/// # Example
///
/// ```rust
/// use htmlmd::{parse_html, Converter};
///
/// let document = parse_html("<h1>Hello <em>World</em></h1>");
/// assert!(document.find_body().is_some());
///
/// let markdown = Converter::new().convert(&document).unwrap();
/// assert_eq!(markdown, "# Hello *World*");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_document(html);
    let root = document.root_element();

    // Built with an explicit stack: nesting depth of the input is unbounded
    let mut stack = vec![(element_from(root.value()), root.children())];

    loop {
        let next = match stack.last_mut() {
            Some((_, children)) => children.next(),
            None => unreachable!("the root frame is popped last"),
        };

        match next {
            Some(child) => match child.value() {
                ScraperNode::Text(text) => {
                    if let Some((parent, _)) = stack.last_mut() {
                        parent.add_child(Node::text(&text.text));
                    }
                }
                ScraperNode::Element(element) => {
                    stack.push((element_from(element), child.children()));
                }
                _ => {}
            },
            None => {
                let Some((finished, _)) = stack.pop() else {
                    unreachable!("the stack is never empty inside the loop")
                };
                match stack.last_mut() {
                    Some((parent, _)) => parent.add_child(Node::Element(finished)),
                    None => return Node::Element(finished),
                }
            }
        }
    }
}

fn element_from(element: &Element) -> ElementNode {
    let mut node = ElementNode::new(element.name());
    for (name, value) in element.attrs() {
        node.set_attr(name, value);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_html() {
        let node = parse_html("<p>Hello World</p>");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "html");

        let body = node.find_body().expect("body is synthesised");
        assert_eq!(body.children.len(), 1);
        assert_eq!(body.children[0].tag_name(), "p");
        assert_eq!(body.children[0].text_content(), "Hello World");
    }

    #[test]
    fn test_parse_attributes() {
        let node = parse_html(r#"<a HREF="https://example.com" title="t">x</a>"#);
        let body = node.find_body().unwrap();
        assert_eq!(body.children[0].attr("href"), Some("https://example.com"));
        assert_eq!(body.children[0].attr("title"), Some("t"));
    }

    #[test]
    fn test_text_nodes_know_their_parent() {
        let node = parse_html("<pre>  a\n b</pre>");
        let body = node.find_body().unwrap();
        match body.children[0].children().next() {
            Some(Node::Text(text)) => {
                assert_eq!(text.parent_tag_name.as_deref(), Some("pre"));
                assert_eq!(text.text, "  a\n b");
            }
            other => panic!("expected text, got {:?}", other),
        };
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let node = parse_html("<div><p>unclosed<b>bold</div></span>tail");
        let body = node.find_body().unwrap();
        assert!(node.has_content());
        assert!(body.text_content().contains("unclosed"));
        assert!(body.text_content().contains("tail"));
    }

    #[test]
    fn test_comments_are_dropped() {
        let node = parse_html("<!-- note --><p>x</p>");
        assert!(!node.text_content().contains("note"));
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let html = format!("{}x", "<span>".repeat(60_000));
        let node = parse_html(&html);
        assert!(node.depth() > 60_000);
        drop(node);
    }
}
