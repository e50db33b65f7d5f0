// src/output/types.rs
//! Planned deliveries and the report of carrying them out.

use std::path::PathBuf;

/// Everything that should happen to the rendered tree, in order.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub targets: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: DeliveryTarget) -> Self {
        self.targets.push(target);
        self
    }

    /// Plans a single delivery: the file when one is given, stdout otherwise.
    pub fn for_destination(path: Option<PathBuf>, content: String) -> Self {
        let target = match path {
            Some(path) => DeliveryTarget::WriteFile { path, content },
            None => DeliveryTarget::PrintToStdout { content },
        };
        Self::new().with_target(target)
    }
}

/// A single place the rendered text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    WriteFile { path: PathBuf, content: String },
    PrintToStdout { content: String },
}

impl DeliveryTarget {
    pub fn describe(&self) -> String {
        match self {
            DeliveryTarget::WriteFile { path, .. } => path.display().to_string(),
            DeliveryTarget::PrintToStdout { .. } => "stdout".to_string(),
        }
    }
}

/// Outcome of [`super::deliver`].
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub completed: Vec<CompletedDelivery>,
    pub failed: Vec<FailedDelivery>,
    pub bytes_written: usize,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(mut self, delivery: CompletedDelivery) -> Self {
        self.bytes_written += delivery.bytes_written;
        self.completed.push(delivery);
        self
    }

    pub fn with_failed(mut self, delivery: FailedDelivery) -> Self {
        self.failed.push(delivery);
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Paths of the files that were written.
    pub fn written_files(&self) -> Vec<&PathBuf> {
        self.completed
            .iter()
            .filter_map(|done| match &done.target {
                DeliveryTarget::WriteFile { path, .. } => Some(path),
                DeliveryTarget::PrintToStdout { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct CompletedDelivery {
    pub target: DeliveryTarget,
    pub bytes_written: usize,
}

#[derive(Debug, Clone)]
pub struct FailedDelivery {
    pub target: DeliveryTarget,
    pub error: String,
}
