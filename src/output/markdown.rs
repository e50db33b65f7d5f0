//! Nested Markdown bullet list.

use chrono::{DateTime, Local};

use super::{generated_line, summary_line, DOCUMENT_HEADING};
use crate::model::{NodeKind, TreeNode};

/// Renders the forest as a Markdown document with a two-space nested list.
pub fn render_markdown(roots: &[TreeNode], generated_at: &DateTime<Local>) -> String {
    let mut output = String::new();
    output.push_str(DOCUMENT_HEADING);
    output.push_str("\n\n");
    output.push_str(&generated_line(generated_at));
    output.push_str("\n\n");
    output.push_str(&summary_line(roots));
    output.push_str("\n\n");

    if roots.is_empty() {
        output.push_str("_No pages or databases found._\n");
        return output;
    }

    for root in roots {
        root.walk(0, &mut |node: &TreeNode, depth: usize| {
            output.push_str(&"  ".repeat(depth));
            output.push_str("- ");
            output.push_str(&markdown_label(node));
            output.push('\n');
        });
    }
    output
}

fn markdown_label(node: &TreeNode) -> String {
    let title = escape_link_text(&node.title);
    let mut label = match &node.url {
        Some(url) => format!("[{}]({})", title, url),
        None => title,
    };
    if node.kind == NodeKind::Database {
        label.push_str(" _(database)_");
    }
    label
}

/// Escapes characters that would otherwise end or restyle link text.
fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '\\' | '*' | '_' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
