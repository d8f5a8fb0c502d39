//! Recursive tree-to-markdown walk.

use std::panic::{self, AssertUnwindSafe};

use crate::context::{ConversionContext, ListKind};
use crate::node::{ElementNode, Node, TextNode};
use crate::rules::{IgnoreSet, Rule, RuleTable};
use crate::utilities::{escape_markdown, is_preformatted, LINE_BREAK_TAG};

/// Walks a node tree and renders it with a rule table.
///
/// Holds only shared references to immutable configuration, so one walker
/// can render any number of trees and several can run on separate threads.
#[derive(Debug, Clone, Copy)]
pub struct Walker<'a> {
    rules: &'a RuleTable,
    ignored: &'a IgnoreSet,
}

impl<'a> Walker<'a> {
    pub fn new(rules: &'a RuleTable, ignored: &'a IgnoreSet) -> Self {
        Self { rules, ignored }
    }

    /// Render a node reached with the given context
    pub fn walk(&self, node: &Node, ctx: ConversionContext) -> String {
        match node {
            Node::Text(text) => self.walk_text(text, false, false),
            Node::Element(element) => self.walk_element(element, ctx),
        }
    }

    /// Render a run of sibling nodes that all share one context
    pub fn walk_nodes(&self, nodes: &[Node], ctx: ConversionContext) -> String {
        self.walk_siblings(nodes, |_| ctx)
    }

    fn walk_siblings<F>(&self, nodes: &[Node], mut ctx_for: F) -> String
    where
        F: FnMut(&Node) -> ConversionContext,
    {
        let mut result = String::new();
        for (i, node) in nodes.iter().enumerate() {
            let ctx = ctx_for(node);
            let rendered = match node {
                Node::Text(text) => self.walk_text(text, i > 0, i + 1 < nodes.len()),
                Node::Element(element) => self.walk_element(element, ctx),
            };
            result.push_str(&rendered);
        }
        result
    }

    fn walk_text(&self, text: &TextNode, has_prev: bool, has_next: bool) -> String {
        let preformatted = text
            .parent_tag_name
            .as_deref()
            .is_some_and(is_preformatted);

        if preformatted {
            return text.text.clone();
        }
        // Whitespace between blocks carries no meaning. This also drops the
        // space between adjacent inline elements such as `<em>a</em> <em>b</em>`.
        if text.is_whitespace() {
            return String::new();
        }

        // Surrounding whitespace facing a sibling shrinks to one space so
        // `Hello <b>world</b>` keeps its gap; an edge with no sibling is
        // trimmed, keeping `<b> here </b>` tight against its markers
        let raw = text.text.as_str();
        let mut result = String::with_capacity(raw.len() + 2);
        if has_prev && raw.starts_with(char::is_whitespace) {
            result.push(' ');
        }
        result.push_str(&escape_markdown(raw.trim()));
        if has_next && raw.ends_with(char::is_whitespace) {
            result.push(' ');
        }
        result
    }

    fn walk_element(&self, element: &ElementNode, ctx: ConversionContext) -> String {
        let tag = element.tag_name.as_str();

        if self.ignored.contains(tag) {
            log::debug!("Ignoring tag: <{}>", tag);
            return String::new();
        }

        if tag == LINE_BREAK_TAG {
            return "\n".to_string();
        }

        let content = self.walk_children(element, ctx);

        match self.rules.get(tag) {
            Some(rule) => apply_rule(rule, element, &content, &ctx),
            None => {
                log::debug!("No rule found for tag <{}>. Returning children content.", tag);
                content
            }
        }
    }

    /// Render the children of an element in order.
    ///
    /// List containers open a new list level for their children. Inside an
    /// `ol`, each direct `li` child gets its 1-based position; every other
    /// child starts again from 1, so numbering never leaks into nested or
    /// sibling subtrees.
    pub fn walk_children(&self, element: &ElementNode, ctx: ConversionContext) -> String {
        let list_kind = ListKind::from_tag(&element.tag_name);
        let child_ctx = match list_kind {
            Some(kind) => ctx.enter_list(kind),
            None => ctx.with_item_index(1),
        };

        let mut next_item = 1;
        self.walk_siblings(&element.children, |child| {
            if list_kind == Some(ListKind::Ordered) && child.tag_name() == "li" {
                let numbered = child_ctx.with_item_index(next_item);
                next_item += 1;
                numbered
            } else {
                child_ctx
            }
        })
    }
}

/// Run a rule, falling back to the unwrapped children if it fails or panics.
///
/// A panic is contained here, but the process panic hook still runs first
/// and prints its message to stderr. Rules that can fail should return a
/// [`RuleError`](crate::RuleError) through [`Rule::fallible`] instead.
fn apply_rule(rule: &Rule, element: &ElementNode, content: &str, ctx: &ConversionContext) -> String {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.apply(element, content, ctx)));

    match outcome {
        Ok(Ok(markdown)) => markdown,
        Ok(Err(err)) => {
            log::warn!(
                "Rule for '{}' failed: {}. Using children content.",
                element.tag_name,
                err
            );
            content.to_string()
        }
        Err(_) => {
            log::warn!(
                "Rule for '{}' panicked. Using children content.",
                element.tag_name
            );
            content.to_string()
        }
    }
}
