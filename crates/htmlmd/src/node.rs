//! Document tree consumed by the converter.
//!
//! Any HTML parser can produce this structure; the `html` feature ships one
//! built on scraper/html5ever. The converter only ever reads a tree, it never
//! mutates one.

use indexmap::IndexMap;

/// Tags the HTML parser synthesises around every document.
const SCAFFOLDING_TAGS: &[&str] = &["html", "head", "body"];

/// A node of the parsed document: either character data or an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(TextNode),
    Element(ElementNode),
}

/// Raw character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub text: String,
    /// Tag name of the enclosing element, used to decide whitespace handling
    pub parent_tag_name: Option<String>,
}

/// An element with a lowercased tag name, its attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub tag_name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Node::Element(ElementNode::new(tag_name))
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut element = ElementNode::new(tag_name);
        for (name, value) in attrs {
            element.set_attr(name, value);
        }
        Node::Element(element)
    }

    /// Create a new text node without a known parent
    pub fn text(content: &str) -> Self {
        Node::Text(TextNode {
            text: content.to_string(),
            parent_tag_name: None,
        })
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Get the tag name, empty for text nodes
    pub fn tag_name(&self) -> &str {
        match self {
            Node::Element(element) => &element.tag_name,
            Node::Text(_) => "",
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Get an attribute value by name (elements only)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element()?.attr(name)
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.as_element().into_iter().flat_map(|e| e.children.iter())
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    /// Add a child node. No-op on text nodes.
    pub fn add_child(&mut self, child: Node) {
        if let Node::Element(element) = self {
            element.add_child(child);
        }
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.text.clone(),
            Node::Element(element) => element.text_content(),
        }
    }

    /// Maximum element nesting depth of the tree rooted here.
    ///
    /// A lone text node has depth 0, an element with only text children has
    /// depth 1. Computed with an explicit stack so arbitrarily deep trees can
    /// be measured before they are walked recursively.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, level)) = stack.pop() {
            if let Node::Element(element) = node {
                let level = level + 1;
                max = max.max(level);
                stack.extend(element.children.iter().map(|child| (child, level)));
            }
        }
        max
    }

    /// First `body` element in document order, if any
    pub fn find_body(&self) -> Option<&ElementNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Node::Element(element) = node {
                if element.tag_name == "body" {
                    return Some(element);
                }
                stack.extend(element.children.iter().rev());
            }
        }
        None
    }

    /// Whether the tree holds anything beyond parser scaffolding.
    ///
    /// True when some text node has non-whitespace content or some element
    /// other than `html`, `head` or `body` exists.
    pub fn has_content(&self) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Text(text) => {
                    if !text.text.trim().is_empty() {
                        return true;
                    }
                }
                Node::Element(element) => {
                    if !SCAFFOLDING_TAGS.contains(&element.tag_name.as_str()) {
                        return true;
                    }
                    stack.extend(element.children.iter());
                }
            }
        }
        false
    }
}

impl TextNode {
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

impl ElementNode {
    /// Create an element with no attributes and no children
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_lowercase(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_lowercase();
        self.attributes.get(&name_lower).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes
            .insert(name.to_lowercase(), value.to_string());
    }

    /// Append a child, recording this element's tag on text children
    pub fn add_child(&mut self, mut child: Node) {
        if let Node::Text(text) = &mut child {
            text.parent_tag_name = Some(self.tag_name.clone());
        }
        self.children.push(child);
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

// Children are freed through an explicit stack; the derived drop glue would
// recurse once per nesting level and overflow on deep documents.
impl Drop for ElementNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            if let Node::Element(element) = &mut node {
                stack.append(&mut element.children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = Node::element("DIV");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "div");
    }

    #[test]
    fn test_create_text() {
        let node = Node::text("Hello World");
        assert!(node.is_text());
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_attributes() {
        let node = Node::element_with_attrs(
            "a",
            vec![("HREF", "https://example.com"), ("title", "Example")],
        );
        assert_eq!(node.attr("href"), Some("https://example.com"));
        assert_eq!(node.attr("Title"), Some("Example"));
        assert_eq!(node.attr("class"), None);
    }

    #[test]
    fn test_children() {
        let mut parent = Node::element("div");
        parent.add_child(Node::text("Hello"));
        parent.add_child(Node::element("span"));
        parent.add_child(Node::text("World"));

        assert_eq!(parent.children().count(), 3);
        assert_eq!(parent.element_children().count(), 1);
    }

    #[test]
    fn test_add_child_records_parent_tag() {
        let mut pre = Node::element("pre");
        pre.add_child(Node::text("  x"));

        match pre.children().next() {
            Some(Node::Text(text)) => assert_eq!(text.parent_tag_name.as_deref(), Some("pre")),
            other => panic!("expected text child, got {:?}", other),
        };
    }

    #[test]
    fn test_text_content() {
        let mut div = Node::element("div");
        div.add_child(Node::text("Hello "));
        let mut span = Node::element("span");
        span.add_child(Node::text("World"));
        div.add_child(span);

        assert_eq!(div.text_content(), "Hello World");
    }

    #[test]
    fn test_depth() {
        assert_eq!(Node::text("x").depth(), 0);

        let mut outer = Node::element("div");
        let mut inner = Node::element("p");
        inner.add_child(Node::element("em"));
        outer.add_child(Node::text("a"));
        outer.add_child(inner);
        assert_eq!(outer.depth(), 3);
    }

    #[test]
    fn test_find_body() {
        let mut html = Node::element("html");
        html.add_child(Node::element("head"));
        let mut body = Node::element("body");
        body.add_child(Node::element("p"));
        html.add_child(body);

        let found = html.find_body().expect("body present");
        assert_eq!(found.children.len(), 1);
        assert!(Node::element("div").find_body().is_none());
    }

    #[test]
    fn test_has_content() {
        let mut html = Node::element("html");
        html.add_child(Node::element("head"));
        let mut body = Node::element("body");
        body.add_child(Node::text("  \n "));
        html.add_child(body);
        assert!(!html.has_content());

        html.add_child(Node::element("hr"));
        assert!(html.has_content());
        assert!(Node::text("x").has_content());
    }

    #[test]
    fn test_deep_tree_drops_without_recursion() {
        let mut node = Node::text("x");
        for _ in 0..200_000 {
            let mut parent = Node::element("div");
            parent.add_child(node);
            node = parent;
        }
        assert_eq!(node.depth(), 200_000);
        drop(node);
    }
}
