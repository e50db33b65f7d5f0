//! ASCII tree inside a Markdown code fence, with URLs as footnotes.

use chrono::{DateTime, Local};

use super::console::draw_tree;
use super::{generated_line, summary_line, DOCUMENT_HEADING};
use crate::model::{NodeKind, TreeNode};

/// Renders the box-drawing tree in a fenced block. Titles with URLs get a
/// `[n]` marker; the matching `[n]: url` lines follow the block in order of
/// appearance.
pub fn render_ascii_markdown(roots: &[TreeNode], generated_at: &DateTime<Local>) -> String {
    let mut footnotes: Vec<String> = Vec::new();
    let tree = draw_tree("Notion Workspace", roots, &mut |node: &TreeNode| {
        let mut label = node.title.clone();
        if node.kind == NodeKind::Database {
            label.push_str(" (database)");
        }
        if let Some(url) = &node.url {
            footnotes.push(url.to_string());
            label.push_str(&format!(" [{}]", footnotes.len()));
        }
        label
    });

    let mut output = String::new();
    output.push_str(DOCUMENT_HEADING);
    output.push_str("\n\n");
    output.push_str(&generated_line(generated_at));
    output.push_str("\n\n");
    output.push_str(&summary_line(roots));
    let fence = fence_for(&tree);
    output.push_str("\n\n");
    output.push_str(&fence);
    output.push_str("text\n");
    output.push_str(&tree);
    output.push_str(&fence);
    output.push('\n');

    if !footnotes.is_empty() {
        output.push('\n');
        for (i, url) in footnotes.iter().enumerate() {
            output.push_str(&format!("[{}]: {}\n", i + 1, url));
        }
    }
    output
}

/// A backtick fence longer than any backtick run inside `content`.
fn fence_for(content: &str) -> String {
    let longest_run = content
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest_run + 1).max(3))
}
