//! Box-drawing tree for terminals.

use colored::Colorize;

use crate::model::{NodeKind, TreeNode};

const WORKSPACE_LABEL: &str = "Notion Workspace";
const EMPTY_NOTICE: &str = "(no pages or databases are shared with this integration)";

/// Renders the forest as a `tree`-style listing under a workspace line.
pub fn render_console(roots: &[TreeNode], color: bool) -> String {
    let header = if color {
        WORKSPACE_LABEL.bold().to_string()
    } else {
        WORKSPACE_LABEL.to_string()
    };
    let mut output = draw_tree(&header, roots, &mut |node: &TreeNode| {
        console_label(node, color)
    });
    if roots.is_empty() {
        output.push_str(EMPTY_NOTICE);
        output.push('\n');
    }
    output
}

fn console_label(node: &TreeNode, color: bool) -> String {
    let mut label = match (node.kind, color) {
        (NodeKind::Database, true) => format!(
            "{} {}",
            node.title.blue().bold(),
            "(database)".blue()
        ),
        (NodeKind::Database, false) => format!("{} (database)", node.title),
        (NodeKind::Page, _) => node.title.clone(),
    };
    if let Some(url) = &node.url {
        label.push(' ');
        if color {
            label.push_str(&url.as_str().dimmed().to_string());
        } else {
            label.push_str(url.as_str());
        }
    }
    label
}

/// Draws `roots` beneath `header` with `├── `, `└── ` and `│   ` guides.
///
/// `label` is called once per node in depth-first order.
pub(crate) fn draw_tree<F>(header: &str, roots: &[TreeNode], label: &mut F) -> String
where
    F: FnMut(&TreeNode) -> String,
{
    let mut output = String::new();
    output.push_str(header);
    output.push('\n');
    draw_children(roots, "", &mut output, label);
    output
}

fn draw_children<F>(nodes: &[TreeNode], prefix: &str, output: &mut String, label: &mut F)
where
    F: FnMut(&TreeNode) -> String,
{
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i == nodes.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };

        output.push_str(prefix);
        output.push_str(connector);
        output.push_str(&label(node));
        output.push('\n');

        let child_prefix = if is_last {
            format!("{}    ", prefix)
        } else {
            format!("{}│   ", prefix)
        };
        draw_children(&node.children, &child_prefix, output, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_tree_layout() {
        let output = render_console(&sample_forest(), false);
        let expected = "\
Notion Workspace
├── Tasks (database) https://www.notion.so/Tasks-1
│   ├── A https://www.notion.so/A-2
│   └── B
└── Notes
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_deep_last_branch_uses_blank_guides() {
        let forest = vec![TreeNode::new(id(1), "Root", NodeKind::Page).with_children(vec![
            TreeNode::new(id(2), "Child", NodeKind::Page)
                .with_children(vec![TreeNode::new(id(3), "Grandchild", NodeKind::Page)]),
        ])];
        let output = render_console(&forest, false);
        assert!(output.contains("└── Root\n    └── Child\n        └── Grandchild\n"));
    }

    #[test]
    fn test_empty_workspace_notice() {
        let output = render_console(&[], false);
        assert_eq!(output, format!("Notion Workspace\n{}\n", EMPTY_NOTICE));
    }
}
