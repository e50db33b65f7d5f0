// src/analytics/mod.rs
//! Measurement and statistics for assembled workspace trees.

use crate::model::{NodeKind, TreeNode};

/// Detailed breakdown of a workspace tree, used for the completion report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSummary {
    pub total_nodes: usize,
    pub pages: usize,
    pub databases: usize,
    /// Depth of the deepest node, with roots at 0. Zero for an empty forest.
    pub deepest_level: usize,
    pub with_urls: usize,
}

/// Measures a forest of workspace roots.
pub fn summarize(roots: &[TreeNode]) -> TreeSummary {
    let mut summary = TreeSummary::default();
    for root in roots {
        root.walk(0, &mut |node: &TreeNode, depth: usize| {
            record_node(&mut summary, node, depth);
        });
    }
    summary
}

fn record_node(summary: &mut TreeSummary, node: &TreeNode, depth: usize) {
    summary.total_nodes += 1;
    summary.deepest_level = summary.deepest_level.max(depth);
    match node.kind {
        NodeKind::Page => summary.pages += 1,
        NodeKind::Database => summary.databases += 1,
    }
    if node.url.is_some() {
        summary.with_urls += 1;
    }
}

/// Counts every node in the forest.
pub fn total_node_count(roots: &[TreeNode]) -> usize {
    roots
        .iter()
        .map(|root| 1 + total_node_count(&root.children))
        .sum()
}
