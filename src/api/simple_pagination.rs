// src/api/simple_pagination.rs
//! Cursor pagination over async closures.

use super::types::{PaginatedResponse, PaginationResult};
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;

/// Calls `fetch_fn` with the page size and the previous cursor until the
/// server reports no further results, concatenating results in order.
pub async fn fetch_all_pages_simple<T, F, Fut>(mut fetch_fn: F) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(NOTION_API_PAGE_SIZE as u32, cursor).await?;

        pages_fetched += 1;
        all_items.extend(response.results);

        // A missing cursor ends the listing even when `has_more` claims otherwise.
        cursor = match (response.has_more, response.next_cursor) {
            (true, Some(next)) => Some(next),
            _ => break,
        };
    }

    log::debug!("Pagination finished after {} request(s)", pages_fetched);

    Ok(PaginationResult {
        total_fetched: all_items.len(),
        items: all_items,
    })
}
