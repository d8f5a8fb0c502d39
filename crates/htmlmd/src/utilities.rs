//! Escaping, block formatting and output normalization helpers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tags whose whole subtree is dropped unless the caller adds more
pub const DEFAULT_IGNORED_TAGS: &[&str] = &["script", "style", "head", "title", "meta", "link"];

/// Tags whose text children are kept verbatim
pub const PREFORMATTED_TAGS: &[&str] = &["pre"];

/// The line-break tag, rendered by the walker itself
pub const LINE_BREAK_TAG: &str = "br";

/// Two newlines appended to block-level output
pub const BLANK_LINE: &str = "\n\n";

static MARKDOWN_SPECIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[`*_{}\[\]()#+.!-]").expect("valid escape pattern"));

static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid newline pattern"));

/// Check if a tag keeps its text children verbatim
pub fn is_preformatted(tag: &str) -> bool {
    PREFORMATTED_TAGS.contains(&tag.to_lowercase().as_str())
}

/// Escape markdown special characters.
///
/// Backslashes are doubled first, then each of `` ` * _ { } [ ] ( ) # + . ! - ``
/// gets a backslash prefix. Escaping is not idempotent: running it over
/// already escaped text escapes the inserted backslashes again.
pub fn escape_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = text.replace('\\', "\\\\");
    MARKDOWN_SPECIAL.replace_all(&text, r"\$0").into_owned()
}

/// Trim block content and terminate it with a blank line
pub fn format_block(content: &str) -> String {
    format!("{}{}", content.trim(), BLANK_LINE)
}

/// Final whitespace pass over a converted document.
///
/// Trims the whole string, then collapses every run of three or more
/// newlines into exactly two. Applying it twice changes nothing.
pub fn normalize_markdown(markdown: &str) -> String {
    EXCESS_NEWLINES
        .replace_all(markdown.trim(), BLANK_LINE)
        .into_owned()
}
