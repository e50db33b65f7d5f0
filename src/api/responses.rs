// src/api/responses.rs
//! Response envelopes for the listing and detail endpoints.
//!
//! Object payloads are decoded through notion-client's wire types; these
//! envelopes only carry the pagination frame and the fields the detail
//! lookups need.

use serde::Deserialize;

// Re-export notion-client types for the adapter and parser.
pub use notion_client::objects::{
    block::Block as NotionBlock, database::Database as NotionDatabase, error::Error as NotionError,
    page::Page as NotionPage,
};

/// Generic paginated response wrapper.
///
/// Results stay as raw JSON so one undecodable object cannot take the
/// whole listing down with it.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse {
    #[allow(dead_code)]
    pub object: String,
    pub results: Vec<serde_json::Value>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// The one field a URL lookup needs from a page or database object.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectUrl {
    pub url: String,
}
