//! Progress events emitted while the tree is assembled, and the reporters
//! that consume them.
//!
//! Events are advisory: nothing in them is needed to rebuild the tree, and
//! a reporter that ignores every event is a valid reporter.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Something observable happened during the traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The root discovery queries are about to be issued.
    DiscoveryStarted,
    /// Root discovery has found `count` workspace-level items so far.
    RootsFound { count: usize },
    /// Root `index` (1-based) of `total` is being expanded.
    ExpandingRoot {
        index: usize,
        total: usize,
        title: String,
    },
    /// Sampled running count of visited nodes.
    NodesVisited { count: usize },
    /// The traversal completed having visited `nodes` nodes.
    Finished { nodes: usize },
}

/// Consumes progress events.
pub trait ProgressReporter: Send {
    fn report(&mut self, event: &ProgressEvent);
}

/// Ignores every event (quiet mode).
#[derive(Debug, Default, Clone, Copy)]
pub struct QuietReporter;

impl ProgressReporter for QuietReporter {
    fn report(&mut self, _event: &ProgressEvent) {}
}

/// Records every event, in order.
impl ProgressReporter for Vec<ProgressEvent> {
    fn report(&mut self, event: &ProgressEvent) {
        self.push(event.clone());
    }
}

/// Formats the `[done/total, pct%]` prefix shown in front of progress messages.
pub fn progress_prefix(done: usize, total: usize) -> String {
    let pct = if total == 0 { 100 } else { done * 100 / total };
    format!("[{}/{}, {}%]", done, total, pct)
}

/// Terminal spinner that shows which root is being expanded and how many
/// nodes have been seen.
pub struct SpinnerReporter {
    bar: ProgressBar,
    prefix: String,
    current_root: String,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self {
            bar,
            prefix: String::new(),
            current_root: String::new(),
        }
    }
}

impl Default for SpinnerReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::DiscoveryStarted => {
                self.bar.set_message("Discovering workspace roots...");
            }
            ProgressEvent::RootsFound { count } => {
                self.bar
                    .set_message(format!("Discovering workspace roots... found {}", count));
            }
            ProgressEvent::ExpandingRoot {
                index,
                total,
                title,
            } => {
                self.prefix = progress_prefix(index.saturating_sub(1), *total);
                self.current_root = title.clone();
                self.bar
                    .set_message(format!("{} Expanding {}", self.prefix, self.current_root));
            }
            ProgressEvent::NodesVisited { count } => {
                self.bar.set_message(format!(
                    "{} Expanding {} ({} items found)",
                    self.prefix, self.current_root, count
                ));
            }
            ProgressEvent::Finished { .. } => {
                self.bar.finish_and_clear();
            }
        }
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
