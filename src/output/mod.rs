// src/output/mod.rs
//! Rendering of the finished tree and delivery of the rendered text.
//!
//! Renderers are pure functions from a forest to a string; only the
//! writer performs I/O.

mod ascii;
mod console;
mod json;
mod markdown;
mod types;
mod writer;

use chrono::{DateTime, Local};

use crate::config::OutputFormat;
use crate::error::AppError;
use crate::model::TreeNode;

pub use ascii::render_ascii_markdown;
pub use console::render_console;
pub use json::render_json;
pub use markdown::render_markdown;
pub use types::{DeliveryTarget, OutputPlan, OutputReport};
pub use writer::deliver;

/// Presentation settings shared by the renderers.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    /// ANSI colours in console output.
    pub color: bool,
    /// Timestamp printed in Markdown headers.
    pub generated_at: DateTime<Local>,
}

impl RenderStyle {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            generated_at: Local::now(),
        }
    }
}

/// Renders `roots` in the requested format.
pub fn render_tree(
    format: OutputFormat,
    roots: &[TreeNode],
    style: &RenderStyle,
) -> Result<String, AppError> {
    log::debug!("Rendering {} root(s) as {:?}", roots.len(), format);
    match format {
        OutputFormat::Console => Ok(render_console(roots, style.color)),
        OutputFormat::Markdown => Ok(render_markdown(roots, &style.generated_at)),
        OutputFormat::Ascii => Ok(render_ascii_markdown(roots, &style.generated_at)),
        OutputFormat::Json => render_json(roots),
    }
}

pub(crate) const DOCUMENT_HEADING: &str = "# Notion Workspace Tree";

/// `_Generated ..._` line used by both Markdown renderers.
pub(crate) fn generated_line(generated_at: &DateTime<Local>) -> String {
    format!("_Generated {}_", generated_at.format("%Y-%m-%d %H:%M:%S"))
}

/// `5 items: 4 pages, 1 database`
pub(crate) fn summary_line(roots: &[TreeNode]) -> String {
    let summary = crate::analytics::summarize(roots);
    format!(
        "{}: {}, {}",
        plural(summary.total_nodes, "item", "items"),
        plural(summary.pages, "page", "pages"),
        plural(summary.databases, "database", "databases")
    )
}

pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
