//! List-nesting state threaded through the tree walk.

/// Kind of the innermost enclosing list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    /// Map a list container tag to its kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ol" => Some(ListKind::Ordered),
            "ul" => Some(ListKind::Unordered),
            _ => None,
        }
    }
}

/// Context handed to each node by its parent.
///
/// Passed by value: a list container derives a fresh context for its
/// children, every other element hands its own context down with the item
/// index reset, so no counter is ever shared between sibling subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionContext {
    /// Number of enclosing `ul`/`ol` containers
    pub list_depth: usize,
    /// Kind of the innermost enclosing list
    pub list_kind: Option<ListKind>,
    /// 1-based position among the list items of an ordered list
    pub item_index: usize,
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self {
            list_depth: 0,
            list_kind: None,
            item_index: 1,
        }
    }
}

impl ConversionContext {
    /// Context for the children of a list container
    pub fn enter_list(self, kind: ListKind) -> Self {
        Self {
            list_depth: self.list_depth + 1,
            list_kind: Some(kind),
            item_index: 1,
        }
    }

    pub fn with_item_index(self, item_index: usize) -> Self {
        Self { item_index, ..self }
    }

    pub fn is_ordered(&self) -> bool {
        self.list_kind == Some(ListKind::Ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = ConversionContext::default();
        assert_eq!(ctx.list_depth, 0);
        assert_eq!(ctx.list_kind, None);
        assert_eq!(ctx.item_index, 1);
    }

    #[test]
    fn test_enter_list_resets_index() {
        let ctx = ConversionContext::default()
            .enter_list(ListKind::Ordered)
            .with_item_index(4)
            .enter_list(ListKind::Unordered);
        assert_eq!(ctx.list_depth, 2);
        assert_eq!(ctx.list_kind, Some(ListKind::Unordered));
        assert_eq!(ctx.item_index, 1);
        assert!(!ctx.is_ordered());
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(ListKind::from_tag("ol"), Some(ListKind::Ordered));
        assert_eq!(ListKind::from_tag("ul"), Some(ListKind::Unordered));
        assert_eq!(ListKind::from_tag("li"), None);
    }
}
