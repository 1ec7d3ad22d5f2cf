//! Human-readable renderings of a guideline tree.

use std::fmt;

use super::node::{Node, Tree};

/// Pixels of indentation per nesting level in the HTML view
const HTML_INDENT_PX: usize = 20;

/// Spaces of indentation per nesting level in the text view
const TEXT_INDENT: usize = 2;

/// Nested, collapsible `<details>` elements for a tree
pub struct HtmlView<'a> {
    pub tree: &'a Tree,
    pub open: bool,
}

impl fmt::Display for HtmlView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.open { "open" } else { "closed" };
        writeln!(f, "<details {}>", state)?;
        writeln!(f, "<summary><strong>Guidelines</strong></summary>")?;
        writeln!(f, "<div style=\"margin-left: {}px\">", HTML_INDENT_PX)?;
        html_level(self.tree, f)?;
        writeln!(f, "</div>\n</details>")
    }
}

fn html_level(tree: &Tree, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (key, node) in tree {
        let safe_key = escape_html(key);
        match node {
            Node::Branch(child) => {
                writeln!(f, "<details>")?;
                writeln!(f, "<summary><strong>{}</strong></summary>", safe_key)?;
                writeln!(f, "<div style=\"margin-left: {}px\">", HTML_INDENT_PX)?;
                html_level(child, f)?;
                writeln!(f, "</div>\n</details>")?;
            }
            Node::Leaf(_) => writeln!(
                f,
                "<div><strong>{}:</strong> {}</div>",
                safe_key,
                escape_html(&node.to_property_string())
            )?,
        }
    }
    Ok(())
}

/// Indented plain-text outline of a tree
pub struct TextView<'a> {
    pub tree: &'a Tree,
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text_level(self.tree, 0, f)
    }
}

fn text_level(tree: &Tree, level: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let pad = " ".repeat(level * TEXT_INDENT);
    for (key, node) in tree {
        match node {
            Node::Branch(child) => {
                writeln!(f, "{}{}", pad, key)?;
                text_level(child, level + 1, f)?;
            }
            Node::Leaf(_) => writeln!(f, "{}{}: {}", pad, key, node.to_property_string())?,
        }
    }
    Ok(())
}

/// Render the tree as nested, collapsible `<details>` elements.
pub fn to_html(tree: &Tree, open: bool) -> String {
    HtmlView { tree, open }.to_string()
}

/// Render the tree as an indented plain-text outline.
pub fn to_text_tree(tree: &Tree) -> String {
    TextView { tree }.to_string()
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
