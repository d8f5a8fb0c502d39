//! Built-in rules.

use super::{Rule, RuleTable};
use crate::context::ConversionContext;
use crate::utilities::{escape_markdown, format_block};

/// Create the default rule table
pub fn default_rules() -> RuleTable {
    let mut table = RuleTable::new();

    for level in 1..=6 {
        table.insert(&format!("h{}", level), heading_rule(level));
    }
    table.insert("p", paragraph_rule());
    table.insert("a", link_rule());
    table.insert("strong", strong_rule());
    table.insert("b", strong_rule());
    table.insert("em", emphasis_rule());
    table.insert("i", emphasis_rule());
    table.insert("code", code_rule());
    table.insert("pre", code_block_rule());
    table.insert("hr", horizontal_rule());
    table.insert("img", image_rule());
    table.insert("ul", list_rule());
    table.insert("ol", list_rule());
    table.insert("li", list_item_rule());
    table.insert("blockquote", blockquote_rule());

    table
}

fn heading_rule(level: usize) -> Rule {
    Rule::new(move |_, content, _| {
        format_block(&format!("{} {}", "#".repeat(level), content.trim()))
    })
}

fn paragraph_rule() -> Rule {
    Rule::new(|_, content, _| format_block(content))
}

fn link_rule() -> Rule {
    Rule::new(|node, content, _| {
        let href = node.attr("href").unwrap_or("");
        format!("[{}]({})", escape_markdown(content.trim()), href)
    })
}

fn strong_rule() -> Rule {
    Rule::new(|_, content, _| format!("**{}**", content))
}

fn emphasis_rule() -> Rule {
    Rule::new(|_, content, _| format!("*{}*", content))
}

// Inline code reads the element's literal text, nested markup is flattened
fn code_rule() -> Rule {
    Rule::new(|node, _, _| format!("`{}`", escape_markdown(&node.text_content())))
}

fn code_block_rule() -> Rule {
    Rule::new(|node, _, _| {
        let text = node.text_content();
        let code = text.trim_start_matches(['\n', '\r']).trim_end();
        format_block(&format!("```\n{}\n```", code))
    })
}

fn horizontal_rule() -> Rule {
    Rule::new(|_, _, _| format_block("---"))
}

fn image_rule() -> Rule {
    Rule::new(|node, _, _| {
        let alt = node.attr("alt").unwrap_or("");
        let src = node.attr("src").unwrap_or("");
        format!("![{}]({})", escape_markdown(alt), src)
    })
}

fn list_rule() -> Rule {
    Rule::new(|_, content, ctx| {
        if ctx.list_depth > 0 {
            // Nested lists start on their own line below the parent item
            // and keep the first item's indentation
            format!("\n{}\n", content.trim_start_matches('\n').trim_end())
        } else {
            format_block(content)
        }
    })
}

fn list_item_rule() -> Rule {
    Rule::new(|_, content, ctx| {
        format!(
            "{}{}{}\n",
            "  ".repeat(ctx.list_depth.saturating_sub(1)),
            list_marker(ctx),
            content.trim()
        )
    })
}

fn list_marker(ctx: &ConversionContext) -> String {
    if ctx.is_ordered() {
        format!("{}. ", ctx.item_index)
    } else {
        "* ".to_string()
    }
}

fn blockquote_rule() -> Rule {
    Rule::new(|_, content, _| {
        let quoted: Vec<String> = content
            .trim()
            .split('\n')
            .map(|line| format!("> {}", line))
            .collect();
        format_block(&quoted.join("\n"))
    })
}
