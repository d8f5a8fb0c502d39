//! Rule type for element conversion.

use crate::context::ConversionContext;
use crate::node::ElementNode;

/// Type alias for replacement functions
pub type ReplacementFn = Box<
    dyn Fn(&ElementNode, &str, &ConversionContext) -> Result<String, RuleError> + Send + Sync,
>;

/// A rule that could not produce output for an element.
///
/// Never escapes the converter: the walker logs it and keeps the element's
/// children unwrapped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RuleError {
    message: String,
}

impl RuleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A rule defines how an element's converted children are wrapped.
///
/// It sees the element, the markdown already produced for its children and
/// the context the element was reached with, and nothing else.
pub struct Rule {
    replacement: ReplacementFn,
}

impl Rule {
    /// Create a rule that always produces output
    pub fn new<F>(replacement: F) -> Self
    where
        F: Fn(&ElementNode, &str, &ConversionContext) -> String + Send + Sync + 'static,
    {
        Self {
            replacement: Box::new(move |element, content, ctx| Ok(replacement(element, content, ctx))),
        }
    }

    /// Create a rule that may reject an element
    pub fn fallible<F>(replacement: F) -> Self
    where
        F: Fn(&ElementNode, &str, &ConversionContext) -> Result<String, RuleError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            replacement: Box::new(replacement),
        }
    }

    /// Apply this rule's replacement
    pub fn apply(
        &self,
        element: &ElementNode,
        content: &str,
        ctx: &ConversionContext,
    ) -> Result<String, RuleError> {
        (self.replacement)(element, content, ctx)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Rule")
    }
}
