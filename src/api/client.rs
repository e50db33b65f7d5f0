//! Thin HTTP client for the Notion API.
//!
//! This module wraps reqwest for authenticated requests against the Notion
//! REST API and implements [`WorkspaceRepository`] on top of it. Parsing
//! lives in `parser`; nothing here knows about the tree being built.

use super::parser;
use super::WorkspaceRepository;
use crate::constants::{
    NOTION_API_PAGE_SIZE, NOTION_API_VERSION, RATE_LIMIT_MAX_ATTEMPTS, RATE_LIMIT_MAX_WAIT_SECS,
};
use crate::error::AppError;
use crate::model::{ChildBlockPage, RemoteItem};
use crate::types::{ApiKey, NotionId, ValidatedUrl};
use reqwest::{header, Client, Method, Response, StatusCode};
use serde_json::json;
use std::time::Duration;

const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Creates a client against a different API root (used for proxies and tests).
    pub fn with_base_url(api_key: &ApiKey, base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint.
    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<String>, AppError> {
        self.send(Method::GET, endpoint, query, None).await
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<ApiResponse<String>, AppError> {
        self.send(Method::POST, endpoint, &[], Some(body)).await
    }

    /// Sends a request, waiting out `429 rate_limited` answers.
    ///
    /// Any other status, success or not, is returned to the parser as-is.
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse<String>, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut attempt = 1;

        loop {
            log::debug!("{} {}", method, url);

            let mut request = self.client.request(method.clone(), &url).query(query);
            if let Some(body) = body {
                request = request.json(body);
            }
            let response = request.send().await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS
                && attempt < RATE_LIMIT_MAX_ATTEMPTS
            {
                let wait = retry_after(&response);
                log::warn!(
                    "Rate limited on {} (attempt {}), retrying after {:?}",
                    endpoint,
                    attempt,
                    wait
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
                continue;
            }

            log::debug!("{} {} -> {}", method, endpoint, response.status());
            return extract_response_text(response).await;
        }
    }

    async fn search(&self, object_kind: &str) -> Result<ApiResponse<String>, AppError> {
        let body = json!({
            "filter": { "property": "object", "value": object_kind },
            "page_size": NOTION_API_PAGE_SIZE,
        });
        self.post("search", &body).await
    }
}

/// The wait requested by a `Retry-After` header, bounded; one second when absent.
fn retry_after(response: &Response) -> Duration {
    let secs = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(1);
    Duration::from_secs(secs.min(RATE_LIMIT_MAX_WAIT_SECS))
}

#[async_trait::async_trait]
impl WorkspaceRepository for NotionHttpClient {
    async fn list_root_pages(&self) -> Result<Vec<RemoteItem>, AppError> {
        let result = self.search("page").await?;
        parser::parse_page_listing(result)
    }

    async fn list_root_databases(&self) -> Result<Vec<RemoteItem>, AppError> {
        let result = self.search("database").await?;
        parser::parse_database_listing(result)
    }

    async fn list_database_rows(&self, database: &NotionId) -> Result<Vec<RemoteItem>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_hyphenated());
        let body = json!({ "page_size": NOTION_API_PAGE_SIZE });
        let result = self.post(&endpoint, &body).await?;
        parser::parse_page_listing(result)
    }

    async fn list_page_children(
        &self,
        page: &NotionId,
        cursor: Option<String>,
    ) -> Result<ChildBlockPage, AppError> {
        let endpoint = format!("blocks/{}/children", page.to_hyphenated());
        let mut query = vec![("page_size", NOTION_API_PAGE_SIZE.to_string())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor));
        }
        let result = self.get(&endpoint, &query).await?;
        parser::parse_block_children(result)
    }

    async fn fetch_page_url(&self, page: &NotionId) -> Result<ValidatedUrl, AppError> {
        let endpoint = format!("pages/{}", page.to_hyphenated());
        let result = self.get(&endpoint, &[]).await?;
        parser::parse_object_url(result)
    }

    async fn fetch_database_url(&self, database: &NotionId) -> Result<ValidatedUrl, AppError> {
        let endpoint = format!("databases/{}", database.to_hyphenated());
        let result = self.get(&endpoint, &[]).await?;
        parser::parse_object_url(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_carry_bearer_token_and_version() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrs").unwrap();
        let headers = NotionHttpClient::create_headers(&key).unwrap();
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer secret_abcdefghijklmnopqrs"
        );
        assert_eq!(headers.get("Notion-Version").unwrap(), NOTION_API_VERSION);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrs").unwrap();
        let client = NotionHttpClient::with_base_url(&key, "http://localhost:9999/v1/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9999/v1");
    }
}
