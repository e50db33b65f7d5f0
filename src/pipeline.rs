// src/pipeline.rs
//! Capability traits for the three stages of a run: collect, render, deliver.
//!
//! Each trait describes a single capability so every stage can be tested in
//! isolation.

use crate::error::AppError;
use crate::model::TreeNode;
use crate::output::OutputReport;
use crate::traversal::{ProgressReporter, TraversalOutcome, TreeBuilder};

/// Produces the workspace tree.
#[async_trait::async_trait]
pub trait TreeSource {
    async fn collect(
        &self,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<TraversalOutcome, AppError>;
}

/// Turns the finished forest into text.
pub trait TreeRenderer {
    fn render(&self, roots: &[TreeNode]) -> Result<String, AppError>;
}

/// Sends rendered text to its destination.
pub trait TreeDelivery {
    fn deliver(&self, rendered: String) -> Result<OutputReport, AppError>;
}

#[async_trait::async_trait]
impl TreeSource for TreeBuilder<'_> {
    async fn collect(
        &self,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<TraversalOutcome, AppError> {
        self.build(reporter).await
    }
}
