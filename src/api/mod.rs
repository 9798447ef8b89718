// src/api/mod.rs
//! Notion API interaction: the document store the walker reads from.
//!
//! The walker depends on [`NotionRepository`] only. HTTP details, response
//! parsing and the conversion from `notion-client` types live behind it.

pub mod client;
pub mod notion_client_adapter;
pub mod parser;
mod responses;
mod simple_pagination;
mod types;

use crate::error::AppError;
use crate::model::{Block, PageMetadata};
use crate::types::NotionId;

pub use client::{ApiResponse, NotionHttpClient};
pub use simple_pagination::fetch_all_pages_simple;
pub use types::{PaginatedResponse, PaginationResult};

/// The ability to read pages and blocks from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// One page of the children of `parent`, starting at `cursor`.
    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<String>,
        page_size: u32,
    ) -> Result<PaginatedResponse<Block>, AppError>;

    async fn retrieve_page_metadata(&self, id: &NotionId) -> Result<PageMetadata, AppError>;

    /// The rows of a table block, from a single children request.
    async fn retrieve_table_rows(&self, table: &NotionId) -> Result<Vec<Block>, AppError>;

    /// Every child of `parent` in server order, following cursors until the
    /// listing is exhausted.
    async fn list_all_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        let result = fetch_all_pages_simple(|page_size, cursor| {
            self.list_children(parent, cursor, page_size)
        })
        .await?;
        log::debug!(
            "Fetched {} children of {}",
            result.total_fetched,
            parent.as_str()
        );
        Ok(result.items)
    }
}
