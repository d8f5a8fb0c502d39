//! Converter - the main entry point for HTML to Markdown conversion.

use crate::context::ConversionContext;
use crate::node::Node;
use crate::rules::{IgnoreSet, Rule, RuleTable};
use crate::utilities::{escape_markdown, normalize_markdown};
use crate::walker::Walker;
use crate::{ConvertError, Result};

/// Default maximum element nesting depth accepted by a converter
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options for Converter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Tags ignored in addition to the defaults
    pub extra_ignored_tags: Vec<String>,

    /// Documents nested deeper than this are rejected before conversion
    pub max_depth: usize,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            extra_ignored_tags: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Builder collecting options and rule overrides for a [`Converter`]
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    options: ConverterOptions,
    overrides: Vec<(String, Rule)>,
}

impl ConverterBuilder {
    pub fn with_options(options: ConverterOptions) -> Self {
        Self {
            options,
            overrides: Vec::new(),
        }
    }

    /// Add or replace the rule for a tag
    pub fn add_rule(mut self, tag: &str, rule: Rule) -> Self {
        self.overrides.push((tag.to_lowercase(), rule));
        self
    }

    /// Drop a tag's entire subtree from the output
    pub fn ignore_tag(mut self, tag: &str) -> Self {
        self.options.extra_ignored_tags.push(tag.to_string());
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(self, plugin: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        plugin(self)
    }

    pub fn build(self) -> Converter {
        let mut rules = RuleTable::with_defaults();
        rules.extend(self.overrides);

        let mut ignored = IgnoreSet::default();
        ignored.extend(&self.options.extra_ignored_tags);

        log::debug!("Converter initialized.");
        log::debug!("Ignore tags: {:?}", ignored.iter().collect::<Vec<_>>());

        Converter {
            options: self.options,
            rules,
            ignored,
        }
    }
}

/// Converts document trees to Markdown.
///
/// The rule table and ignore set are fixed when the converter is built, so a
/// converter can be shared across threads and reused for any number of
/// documents.
#[derive(Debug)]
pub struct Converter {
    options: ConverterOptions,
    rules: RuleTable,
    ignored: IgnoreSet,
}

impl Converter {
    /// Create a Converter with the default rules and ignore set
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a Converter with custom options
    pub fn with_options(options: ConverterOptions) -> Self {
        ConverterBuilder::with_options(options).build()
    }

    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::default()
    }

    /// Convert a document tree to Markdown.
    ///
    /// The `body` element is used as the root when present, otherwise the
    /// tree's own root. Each direct child of the root is rendered with a
    /// fresh context and the result is normalized.
    pub fn convert(&self, document: &Node) -> Result<String> {
        log::info!("Starting HTML to Markdown conversion...");

        if !document.has_content() {
            return Err(ConvertError::InvalidInput(
                "Input HTML appears empty or contains no valid elements".to_string(),
            ));
        }

        let depth = document.depth();
        if depth > self.options.max_depth {
            return Err(ConvertError::DepthLimitExceeded {
                depth,
                limit: self.options.max_depth,
            });
        }

        let walker = Walker::new(&self.rules, &self.ignored);
        let markdown = match document {
            Node::Text(_) => walker.walk(document, ConversionContext::default()),
            Node::Element(root) => {
                let root = document.find_body().unwrap_or(root);
                walker.walk_nodes(&root.children, ConversionContext::default())
            }
        };

        let result = normalize_markdown(&markdown);
        log::info!("Conversion finished.");
        Ok(result)
    }

    /// Parse and convert an HTML string
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> Result<String> {
        validate_input(html)?;
        let document = crate::html::parse_html(html);
        self.convert(&document)
    }

    /// Escape markdown special characters in a string
    pub fn escape(&self, text: &str) -> String {
        escape_markdown(text)
    }

    /// Get the current options
    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn ignored_tags(&self) -> &IgnoreSet {
        &self.ignored
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject input that cannot hold any content
pub fn validate_input(html: &str) -> Result<()> {
    if html.trim().is_empty() {
        return Err(ConvertError::InvalidInput(
            "Input HTML content is empty or whitespace only".to_string(),
        ));
    }
    Ok(())
}
