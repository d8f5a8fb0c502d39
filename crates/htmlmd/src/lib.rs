//! # htmlmd
//!
//! Convert parsed HTML trees to Markdown.
//!
//! The converter walks a document tree recursively, renders every element
//! through a per-tag rule table and threads list context (depth, kind, item
//! number) down the walk. Rules are plain functions keyed by tag name, so the
//! table can be extended or overridden per converter without touching the
//! walker.
//!
//! ## Design
//!
//! - **Parser agnostic**: the core consumes a [`Node`] tree; the `html`
//!   feature (on by default) adds a scraper/html5ever based [`parse_html`].
//! - **Fault tolerant**: unknown tags pass their children through, and a rule
//!   that fails or panics degrades to its unwrapped children.
//! - **Stateless walk**: each conversion starts from a fresh context; a
//!   converter holds nothing but its immutable configuration.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use htmlmd::{Converter, Node};
//!
//! let converter = Converter::new();
//!
//! let mut h1 = Node::element("h1");
//! h1.add_child(Node::text("Hello World"));
//! let mut body = Node::element("body");
//! body.add_child(h1);
//!
//! let markdown = converter.convert(&body).unwrap();
//! assert_eq!(markdown, "# Hello World");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use htmlmd::{convert, ConverterOptions};
//!
//! let markdown = convert("<ul><li>One</li><li>Two</li></ul>", &ConverterOptions::default()).unwrap();
//! assert_eq!(markdown, "* One\n* Two");
//! ```

pub mod context;
mod converter;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod rules;
mod utilities;
mod walker;

pub use context::{ConversionContext, ListKind};
pub use converter::{
    validate_input, Converter, ConverterBuilder, ConverterOptions, DEFAULT_MAX_DEPTH,
};
#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{ElementNode, Node, TextNode};
pub use rules::{default_rules, IgnoreSet, ReplacementFn, Rule, RuleError, RuleTable};
pub use utilities::*;
pub use walker::Walker;

/// Error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Document nesting depth {depth} exceeds the maximum of {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Convert an HTML string with the given options.
///
/// Fails with [`ConvertError::InvalidInput`] when the input is blank or
/// parses to nothing; otherwise always yields a string, possibly empty.
#[cfg(feature = "html")]
pub fn convert(html: &str, options: &ConverterOptions) -> Result<String> {
    Converter::with_options(options.clone()).convert_html(html)
}
