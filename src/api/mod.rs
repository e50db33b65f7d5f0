// src/api/mod.rs
//! Notion API interaction: read access to the pages and databases a
//! workspace integration has been granted.
//!
//! This module provides a data-oriented interface to the Notion API,
//! with clear separation between I/O operations, parsing, and the
//! traversal that consumes them.

pub mod client;
pub mod notion_client_adapter;
pub mod pagination;
pub mod parser;
mod responses;

use crate::error::AppError;
use crate::model::{ChildBlockPage, RemoteItem};
use crate::types::{NotionId, ValidatedUrl};

/// The ability to list and inspect objects in a Notion workspace.
///
/// This is the fundamental algebra for API interaction. The traversal
/// depends on this trait, never on HTTP details, and every call is a
/// single remote round-trip.
#[async_trait::async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// First page (up to 100) of pages visible to the integration.
    async fn list_root_pages(&self) -> Result<Vec<RemoteItem>, AppError>;

    /// First page (up to 100) of databases visible to the integration.
    async fn list_root_databases(&self) -> Result<Vec<RemoteItem>, AppError>;

    /// First page (up to 100) of rows in a database.
    async fn list_database_rows(&self, database: &NotionId)
        -> Result<Vec<RemoteItem>, AppError>;

    /// One page of a page's child blocks, starting at `cursor`.
    async fn list_page_children(
        &self,
        page: &NotionId,
        cursor: Option<String>,
    ) -> Result<ChildBlockPage, AppError>;

    /// The canonical web URL of a page.
    async fn fetch_page_url(&self, page: &NotionId) -> Result<ValidatedUrl, AppError>;

    /// The canonical web URL of a database.
    async fn fetch_database_url(&self, database: &NotionId) -> Result<ValidatedUrl, AppError>;
}

// Re-export the public interface
pub use client::NotionHttpClient;
pub use pagination::collect_all_pages;
