//! State threaded through one traversal: counters, warnings, and the
//! progress reporter.

use super::progress::{ProgressEvent, ProgressReporter};
use super::TraversalOutcome;
use crate::constants::PROGRESS_SAMPLE_INTERVAL;
use crate::error::AppError;
use crate::model::TreeNode;
use crate::types::Warning;

/// Mutable bookkeeping for a single traversal stream.
///
/// Owned by the call stack of one traversal and passed down by `&mut`, so
/// no locking is involved and nothing outlives the run.
pub struct TraversalContext<'r> {
    reporter: &'r mut dyn ProgressReporter,
    nodes_visited: usize,
    roots_total: usize,
    warnings: Vec<Warning>,
    depth_limit_reached: bool,
}

impl<'r> TraversalContext<'r> {
    pub fn new(reporter: &'r mut dyn ProgressReporter) -> Self {
        Self {
            reporter,
            nodes_visited: 0,
            roots_total: 0,
            warnings: Vec::new(),
            depth_limit_reached: false,
        }
    }

    pub fn emit(&mut self, event: ProgressEvent) {
        self.reporter.report(&event);
    }

    /// Sets the size of the depth-0 frontier.
    pub fn begin_roots(&mut self, total: usize) {
        self.roots_total = total;
    }

    /// Announces root `index` (1-based).
    pub fn expanding_root(&mut self, index: usize, title: &str) {
        let total = self.roots_total;
        self.emit(ProgressEvent::ExpandingRoot {
            index,
            total,
            title: title.to_string(),
        });
    }

    /// Counts a visited node; every `PROGRESS_SAMPLE_INTERVAL`th visit is reported.
    pub fn visit_node(&mut self) {
        self.nodes_visited += 1;
        if self.nodes_visited % PROGRESS_SAMPLE_INTERVAL == 0 {
            let count = self.nodes_visited;
            self.emit(ProgressEvent::NodesVisited { count });
        }
    }

    pub fn nodes_visited(&self) -> usize {
        self.nodes_visited
    }

    pub fn note_depth_limit(&mut self) {
        self.depth_limit_reached = true;
    }

    /// Records a listing failure that left `node` without children.
    pub fn branch_failed(&mut self, node: &TreeNode, listing: &str, error: &AppError) {
        log::warn!(
            "Could not list {} of {} '{}' ({}): {}",
            listing,
            node.kind,
            node.title,
            node.id,
            error
        );
        self.warnings.push(
            Warning::new(format!(
                "{} of '{}' could not be listed: {}",
                listing, node.title, error
            ))
            .with_context(format!("{} {}", node.kind, node.id)),
        );
    }

    /// Closes the run and packages the assembled roots.
    pub fn finish(mut self, roots: Vec<TreeNode>) -> TraversalOutcome {
        let nodes = self.nodes_visited;
        self.emit(ProgressEvent::Finished { nodes });
        TraversalOutcome {
            roots,
            warnings: self.warnings,
            nodes_visited: nodes,
            depth_limit_reached: self.depth_limit_reached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_count_is_sampled_every_fifth_visit() {
        let mut events: Vec<ProgressEvent> = Vec::new();
        let mut context = TraversalContext::new(&mut events);
        for _ in 0..12 {
            context.visit_node();
        }
        assert_eq!(context.nodes_visited(), 12);
        drop(context);

        assert_eq!(
            events,
            vec![
                ProgressEvent::NodesVisited { count: 5 },
                ProgressEvent::NodesVisited { count: 10 },
            ]
        );
    }

    #[test]
    fn test_expanding_root_carries_frontier_size() {
        let mut events: Vec<ProgressEvent> = Vec::new();
        let mut context = TraversalContext::new(&mut events);
        context.begin_roots(3);
        context.expanding_root(2, "Notes");
        let outcome = context.finish(Vec::new());

        assert_eq!(outcome.nodes_visited, 0);
        assert_eq!(
            events,
            vec![
                ProgressEvent::ExpandingRoot {
                    index: 2,
                    total: 3,
                    title: "Notes".to_string()
                },
                ProgressEvent::Finished { nodes: 0 },
            ]
        );
    }
}
