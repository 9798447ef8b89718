// src/api/responses.rs
//! Response shapes read from the Notion API.

use super::types::PaginatedResponse;

pub use notion_client::objects::{
    block::Block as NotionBlock, error::Error as NotionError, page::Page as NotionPage,
};

/// A block children listing whose entries are still raw JSON, so that one
/// block `notion-client` cannot decode does not fail the whole page.
pub type RawBlockChildrenResponse = PaginatedResponse<serde_json::Value>;
