// src/api/client.rs
//! HTTP client for the Notion API.
//!
//! Handles authentication, query strings and retries. Decoding is left to
//! [`super::parser`].

use super::parser::{parse_blocks_pagination, parse_page_metadata};
use super::types::PaginatedResponse;
use super::NotionRepository;
use crate::error::AppError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::model::{Block, PageMetadata};
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Response};

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A reqwest client preconfigured for the Notion API.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    retry: RetryPolicy,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

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
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to `endpoint` (relative to the API base URL).
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("GET {} {:?}", url, query);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// GETs `endpoint` and decodes the body with `parse`, retrying transient
    /// failures under the client's retry policy.
    async fn fetch<T, P>(&self, endpoint: &str, query: &[(&str, String)], parse: P) -> Result<T, AppError>
    where
        P: Fn(ApiResponse<String>) -> Result<T, AppError>,
    {
        retry_with_backoff(
            || async {
                let response = self.get(endpoint, query).await?;
                let result = extract_response_text(response).await?;
                parse(result)
            },
            self.retry,
        )
        .await
    }
}

#[async_trait::async_trait]
impl NotionRepository for NotionHttpClient {
    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<String>,
        page_size: u32,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.to_hyphenated());
        let mut query = vec![("page_size", page_size.to_string())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor));
        }
        self.fetch(&endpoint, &query, parse_blocks_pagination).await
    }

    async fn retrieve_page_metadata(&self, id: &NotionId) -> Result<PageMetadata, AppError> {
        let endpoint = format!("pages/{}", id.to_hyphenated());
        self.fetch(&endpoint, &[], parse_page_metadata).await
    }

    async fn retrieve_table_rows(&self, table: &NotionId) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", table.to_hyphenated());
        let page = self.fetch(&endpoint, &[], parse_blocks_pagination).await?;
        if page.has_more {
            log::warn!(
                "Table {} has more rows than one response holds; later rows are not shown",
                table.as_str()
            );
        }
        Ok(page.results)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Reads the response body as text, keeping status and URL for error reports.
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
