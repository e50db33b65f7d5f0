// src/api/parser.rs
//! Response parsing using notion-client library types.
//!
//! Listings are decoded object by object. A page or database that
//! notion-client cannot model is read leniently from its raw JSON; only
//! objects without a usable id are logged and skipped. A malformed envelope
//! or an error response fails the whole call.

use super::client::ApiResponse;
use super::notion_client_adapter::{
    convert_block, convert_database, convert_page, convert_raw_item,
};
use super::responses::{NotionBlock, NotionDatabase, NotionError, NotionPage, ObjectUrl, PaginatedResponse};
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use crate::model::{
    ChildBlock, ChildBlockKind, ChildBlockPage, NodeKind, RemoteItem, ResultPage,
};
use crate::types::{NotionId, ValidatedUrl};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Parse any Notion API response into `T`, or into the error it reports.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        parse_error(&result.data, result.status, &result.url)
    }
}

/// Parse successful response body
fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);

        let preview = if body.len() > 500 {
            let end = (0..=500).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
            format!("{}...", &body[..end])
        } else {
            body.to_string()
        };

        NotionClientError::Deserialization {
            source: e,
            body: preview,
        }
        .into()
    })
}

/// Parse error response using notion-client error types
fn parse_error<T>(body: &str, status: StatusCode, url: &str) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return Err(NotionClientError::NotionApi {
            status: notion_error.status,
            code: notion_error.code,
            message: notion_error.message,
            request_id: notion_error.request_id,
        }
        .into());
    }

    // Fallback to generic error with HTTP status code
    Err(AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    })
}

/// Decodes each result with `decode`, skipping (and logging) the ones that fail.
fn decode_each<T, F>(results: Vec<Value>, what: &str, mut decode: F) -> Vec<T>
where
    F: FnMut(Value) -> Result<T, AppError>,
{
    results
        .into_iter()
        .filter_map(|value| {
            let id = value
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("<no id>")
                .to_string();
            decode(value)
                .map_err(|e| log::warn!("Skipping {} {}: {}", what, id, e))
                .ok()
        })
        .collect()
}

fn decode_page(value: Value) -> Result<RemoteItem, AppError> {
    match NotionPage::deserialize(&value) {
        Ok(page) => convert_page(page),
        Err(e) => {
            log::debug!("Reading page leniently: {}", e);
            convert_raw_item(&value, NodeKind::Page)
        }
    }
}

fn decode_database(value: Value) -> Result<RemoteItem, AppError> {
    match NotionDatabase::deserialize(&value) {
        Ok(database) => convert_database(database),
        Err(e) => {
            log::debug!("Reading database leniently: {}", e);
            convert_raw_item(&value, NodeKind::Database)
        }
    }
}

/// Blocks of types notion-client cannot decode are still placed in the
/// listing as `Other`, as long as they are not child pages or databases.
fn decode_block(value: Value) -> Result<ChildBlock, AppError> {
    let block_type = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let raw_id = value
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string);

    match serde_json::from_value::<NotionBlock>(value) {
        Ok(block) => convert_block(block),
        Err(e) if block_type == "child_page" || block_type == "child_database" => Err(e.into()),
        Err(_) => {
            let raw_id = raw_id.ok_or_else(|| NotionClientError::ConversionError {
                message: format!("'{}' block missing required ID field", block_type),
            })?;
            Ok(ChildBlock {
                id: NotionId::parse(&raw_id)?,
                kind: ChildBlockKind::Other,
                title: String::new(),
            })
        }
    }
}

/// Parse a page search/query listing.
pub fn parse_page_listing(result: ApiResponse<String>) -> Result<Vec<RemoteItem>, AppError> {
    let response: PaginatedResponse = parse_api_response(result)?;
    Ok(decode_each(response.results, "page", decode_page))
}

/// Parse a database search listing.
pub fn parse_database_listing(result: ApiResponse<String>) -> Result<Vec<RemoteItem>, AppError> {
    let response: PaginatedResponse = parse_api_response(result)?;
    Ok(decode_each(response.results, "database", decode_database))
}

/// Parse one page of a block-children listing.
pub fn parse_block_children(result: ApiResponse<String>) -> Result<ChildBlockPage, AppError> {
    let response: PaginatedResponse = parse_api_response(result)?;
    Ok(ResultPage {
        items: decode_each(response.results, "block", decode_block),
        has_more: response.has_more,
        next_cursor: response.next_cursor,
    })
}

/// Parse the `url` of a retrieved page or database.
pub fn parse_object_url(result: ApiResponse<String>) -> Result<ValidatedUrl, AppError> {
    let object: ObjectUrl = parse_api_response(result)?;
    Ok(ValidatedUrl::parse(&object.url)?)
}
