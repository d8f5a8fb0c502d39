//! Rule table for HTML to Markdown conversion.

mod defaults;
mod rule;

pub use defaults::default_rules;
pub use rule::{ReplacementFn, Rule, RuleError};

use indexmap::{IndexMap, IndexSet};

use crate::utilities::DEFAULT_IGNORED_TAGS;

/// Mapping from lowercase tag name to the rule that formats it
#[derive(Debug, Default)]
pub struct RuleTable {
    rules: IndexMap<String, Rule>,
}

impl RuleTable {
    /// An empty table: every tag is transparent
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rules
    pub fn with_defaults() -> Self {
        default_rules()
    }

    /// Insert a rule, replacing any rule already registered for the tag
    pub fn insert(&mut self, tag: &str, rule: Rule) -> Option<Rule> {
        self.rules.insert(tag.to_lowercase(), rule)
    }

    /// Find the rule for a tag
    pub fn get(&self, tag: &str) -> Option<&Rule> {
        self.rules.get(tag.to_lowercase().as_str())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Merge overrides into this table, later entries winning
    pub fn extend<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (String, Rule)>,
    {
        for (tag, rule) in overrides {
            self.insert(&tag, rule);
        }
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Tags whose entire subtree is excluded from output.
///
/// Always contains the defaults; callers can add tags, never remove them.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    tags: IndexSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self {
            tags: DEFAULT_IGNORED_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Add a tag to the set
    pub fn insert(&mut self, tag: &str) -> bool {
        self.tags.insert(tag.trim().to_lowercase())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag.to_lowercase().as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AsRef<str>> Extend<S> for IgnoreSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag.as_ref());
        }
    }
}
