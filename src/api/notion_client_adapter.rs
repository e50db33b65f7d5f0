// src/api/notion_client_adapter.rs
//! Adapter layer for converting notion-client types to the tree model.
//!
//! Every object is normalized exactly once here, at ingestion: ids are
//! validated, titles resolved, parents classified. Nothing downstream
//! re-inspects the raw API shapes.

use super::responses::{NotionBlock, NotionDatabase, NotionPage};
use crate::error::{AppError, NotionClientError};
use crate::model::{title, ChildBlock, ChildBlockKind, NodeKind, ParentRef, RemoteItem};
use crate::types::{NotionId, ValidatedUrl};
use notion_client::objects::block::BlockType;
use notion_client::objects::parent::Parent as NcParent;
use serde_json::Value;

/// Convert a notion-client Page into a listed item.
pub fn convert_page(notion_page: NotionPage) -> Result<RemoteItem, AppError> {
    Ok(RemoteItem {
        id: NotionId::parse(&notion_page.id)?,
        title: title::page_title(&notion_page),
        kind: NodeKind::Page,
        parent: convert_parent(&notion_page.parent),
        url: convert_url(&notion_page.url),
    })
}

/// Convert a notion-client Database into a listed item.
pub fn convert_database(notion_db: NotionDatabase) -> Result<RemoteItem, AppError> {
    let raw_id = notion_db
        .id
        .as_deref()
        .ok_or_else(|| NotionClientError::ConversionError {
            message: "Database missing required ID field".to_string(),
        })?;

    Ok(RemoteItem {
        id: NotionId::parse(raw_id)?,
        title: title::database_title(&notion_db),
        kind: NodeKind::Database,
        parent: convert_parent(&notion_db.parent),
        url: convert_url(&notion_db.url),
    })
}

/// Convert a page or database that notion-client could not decode.
///
/// Only `id`, `parent`, `url` and the title are read. An object without a
/// usable id is still rejected.
pub fn convert_raw_item(raw: &Value, kind: NodeKind) -> Result<RemoteItem, AppError> {
    let raw_id = raw
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| NotionClientError::ConversionError {
            message: format!("{} missing required ID field", kind),
        })?;
    let title = match kind {
        NodeKind::Page => title::raw_page_title(raw),
        NodeKind::Database => title::raw_database_title(raw),
    };

    Ok(RemoteItem {
        id: NotionId::parse(raw_id)?,
        title,
        kind,
        parent: raw.get("parent").map_or(ParentRef::Unknown, convert_raw_parent),
        url: raw
            .get("url")
            .and_then(Value::as_str)
            .and_then(convert_url),
    })
}

/// Convert a notion-client Block into a child-block entry.
pub fn convert_block(notion_block: NotionBlock) -> Result<ChildBlock, AppError> {
    let raw_id = notion_block
        .id
        .as_deref()
        .ok_or_else(|| NotionClientError::ConversionError {
            message: "Block missing required ID field".to_string(),
        })?;
    let id = NotionId::parse(raw_id)?;

    let (kind, title) = match &notion_block.block_type {
        BlockType::ChildPage { child_page } => (
            ChildBlockKind::ChildPage,
            title::child_page_title(&child_page.title),
        ),
        BlockType::ChildDatabase { child_database } => (
            ChildBlockKind::ChildDatabase,
            title::child_database_title(&child_database.title),
        ),
        _ => (ChildBlockKind::Other, String::new()),
    };

    Ok(ChildBlock { id, kind, title })
}

/// Classify a notion-client Parent.
///
/// Parents that fail to parse are kept as `Unknown` rather than rejected,
/// so such items are simply never treated as workspace roots.
fn convert_parent(notion_parent: &NcParent) -> ParentRef {
    let parsed = |raw: &str, wrap: fn(NotionId) -> ParentRef| {
        NotionId::parse(raw).map(wrap).unwrap_or(ParentRef::Unknown)
    };

    match notion_parent {
        NcParent::Workspace { .. } => ParentRef::Workspace,
        NcParent::PageId { page_id } => parsed(page_id.as_str(), ParentRef::Page),
        NcParent::DatabaseId { database_id } => parsed(database_id.as_str(), ParentRef::Database),
        NcParent::BlockId { block_id } => parsed(block_id.as_str(), ParentRef::Block),
        _ => ParentRef::Unknown,
    }
}

/// Classify a parent given as raw JSON.
fn convert_raw_parent(parent: &Value) -> ParentRef {
    let parent_type = parent.get("type").and_then(Value::as_str).unwrap_or_default();
    let wrap: fn(NotionId) -> ParentRef = match parent_type {
        "workspace" => return ParentRef::Workspace,
        "page_id" => ParentRef::Page,
        "database_id" => ParentRef::Database,
        "block_id" => ParentRef::Block,
        _ => return ParentRef::Unknown,
    };
    parent
        .get(parent_type)
        .and_then(Value::as_str)
        .and_then(|raw| NotionId::parse(raw).ok())
        .map_or(ParentRef::Unknown, wrap)
}

/// Keep a URL only when it is a usable http(s) link.
fn convert_url(raw: &str) -> Option<ValidatedUrl> {
    if raw.is_empty() {
        return None;
    }
    ValidatedUrl::parse(raw)
        .map_err(|e| log::debug!("Ignoring unusable object URL: {}", e))
        .ok()
}
