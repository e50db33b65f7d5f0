// src/lib.rs
//! notion-tree library: discovers every page and database an integration
//! can reach and assembles them into an ordered workspace tree.
//!
//! # Public API
//!
//! - **Error handling**: `AppError`, `NotionErrorCode`, `NotionClientError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `TreeConfig`, `OutputFormat`
//! - **Domain model**: `TreeNode`, `NodeKind`, `RemoteItem`, `ChildBlock`, title normalization
//! - **API client**: `WorkspaceRepository`, `NotionHttpClient`, parsers, pagination
//! - **Traversal**: `TreeBuilder`, `TraversalOptions`, progress reporters
//! - **Output**: renderers and delivery

pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod traversal;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, OutputFormat, TreeConfig};

// --- Domain Model ---
pub use crate::model::{
    ChildBlock, ChildBlockKind, ChildBlockPage, NodeKind, ParentRef, RemoteItem, ResultPage,
    TreeNode,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId, ValidatedUrl, Warning};

// --- API Client ---
pub use crate::api::{collect_all_pages, NotionHttpClient, WorkspaceRepository};

// --- Traversal ---
pub use crate::traversal::{
    ProgressEvent, ProgressReporter, QuietReporter, SpinnerReporter, TraversalOptions,
    TraversalOutcome, TreeBuilder,
};

// --- Output ---
pub use crate::analytics::{summarize, TreeSummary};
pub use crate::output::{deliver, render_tree, DeliveryTarget, OutputPlan, OutputReport, RenderStyle};

// --- Pipeline Traits ---
pub use crate::pipeline::{TreeDelivery, TreeRenderer, TreeSource};
