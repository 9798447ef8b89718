// src/api/parser.rs
//! Turns raw API responses into domain values.
//!
//! Success bodies are decoded with `notion-client`'s serde types; error
//! bodies become typed errors so the retry layer can tell transient
//! failures from permanent ones.

use super::client::ApiResponse;
use super::notion_client_adapter::{convert_block, convert_page_metadata, convert_raw_unsupported};
use super::responses::{NotionBlock, NotionError, NotionPage, RawBlockChildrenResponse};
use super::types::PaginatedResponse;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use crate::model::{Block, PageMetadata};
use reqwest::StatusCode;
use serde_json::Value;

const BODY_PREVIEW_LEN: usize = 500;

/// Parse any Notion API response, success or error.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_with_notion_client(&result.data, &result.url)
    } else {
        parse_error_with_notion_client(&result.data, result.status, &result.url)
    }
}

fn parse_with_notion_client<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        NotionClientError::Deserialization {
            source: e,
            body: body_preview(body),
        }
        .into()
    })
}

fn parse_error_with_notion_client<T>(
    body: &str,
    status: StatusCode,
    url: &str,
) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return Err(NotionClientError::NotionApi {
            status: notion_error.status,
            code: notion_error.code,
            message: notion_error.message,
            request_id: notion_error.request_id,
        }
        .into());
    }

    Err(AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    })
}

fn body_preview(body: &str) -> String {
    match body.char_indices().nth(BODY_PREVIEW_LEN) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Parse a `GET pages/{id}` response into page metadata.
pub fn parse_page_metadata(result: ApiResponse<String>) -> Result<PageMetadata, AppError> {
    let page: NotionPage = parse_api_response(result)?;
    convert_page_metadata(page)
}

/// Parse one page of a block children listing.
///
/// Each block is decoded on its own; a block `notion-client` cannot decode
/// becomes [`Block::Unsupported`] instead of failing the listing.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: RawBlockChildrenResponse = parse_api_response(result)?;

    let results = response
        .results
        .into_iter()
        .map(parse_block_value)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedResponse {
        results,
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

/// Decode a single raw block.
pub fn parse_block_value(raw: Value) -> Result<Block, AppError> {
    let block_type = raw
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    match serde_json::from_value::<NotionBlock>(raw.clone()) {
        Ok(notion_block) => {
            let mut block = convert_block(notion_block)?;
            if let Block::Unsupported(unsupported) = &mut block {
                unsupported.block_type = block_type;
            }
            Ok(block)
        }
        Err(e) => {
            log::debug!("Could not decode '{}' block ({}), keeping it as unsupported", block_type, e);
            convert_raw_unsupported(&raw, &block_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Annotations, MentionType, RichTextType};
    use pretty_assertions::assert_eq;

    fn ok_response(body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status: StatusCode::OK,
            url: "https://api.notion.com/v1/test".to_string(),
        }
    }

    fn error_response(body: &str, status: StatusCode) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status,
            url: "https://api.notion.com/v1/test".to_string(),
        }
    }

    const PARAGRAPH: &str = r#"{
        "object": "block",
        "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
        "parent": { "type": "page_id", "page_id": "59833787-2cf9-4fdf-8782-e53db20768a5" },
        "created_time": "2022-03-01T19:05:00.000Z",
        "last_edited_time": "2022-07-06T19:41:00.000Z",
        "created_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
        "last_edited_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
        "has_children": false,
        "archived": false,
        "type": "paragraph",
        "paragraph": {
            "rich_text": [{
                "type": "text",
                "text": { "content": "Lacinato kale", "link": null },
                "annotations": {
                    "bold": true, "italic": false, "strikethrough": false,
                    "underline": false, "code": false, "color": "default"
                },
                "plain_text": "Lacinato kale",
                "href": null
            }],
            "color": "default"
        }
    }"#;

    #[test]
    fn test_notion_error_body_becomes_api_error() {
        let body = r#"{
            "object": "error",
            "status": 429,
            "code": "rate_limited",
            "message": "Slow down",
            "request_id": "req_123"
        }"#;

        let err = parse_api_response::<Value>(error_response(body, StatusCode::TOO_MANY_REQUESTS))
            .unwrap_err();

        match &err {
            AppError::NotionClient(NotionClientError::NotionApi { code, status, .. }) => {
                assert_eq!(code, "rate_limited");
                assert_eq!(*status, 429);
            }
            other => panic!("expected NotionApi error, got {:?}", other),
        }
        assert!(err.is_retryable());
    }

    #[test]
    fn test_opaque_error_body_falls_back_to_status() {
        let err = parse_api_response::<Value>(error_response(
            "<html>bad gateway</html>",
            StatusCode::BAD_GATEWAY,
        ))
        .unwrap_err();

        assert!(matches!(
            err,
            AppError::NotionService {
                code: NotionErrorCode::ServiceUnavailable,
                ..
            }
        ));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_malformed_success_body() {
        let err = parse_api_response::<Value>(ok_response("not json")).unwrap_err();
        assert!(matches!(
            err,
            AppError::NotionClient(NotionClientError::Deserialization { .. })
        ));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_paragraph_block_decodes() {
        let raw: Value = serde_json::from_str(PARAGRAPH).unwrap();
        let block = parse_block_value(raw).unwrap();

        match block {
            Block::Paragraph(paragraph) => {
                let span = &paragraph.content.rich_text[0];
                assert_eq!(span.plain_text, "Lacinato kale");
                assert_eq!(
                    span.annotations,
                    Annotations {
                        bold: true,
                        ..Annotations::default()
                    }
                );
                assert!(matches!(span.text_type, RichTextType::Text { .. }));
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_block_type_is_kept_as_unsupported() {
        let raw = serde_json::json!({
            "object": "block",
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "has_children": true,
            "type": "holographic_projection",
            "holographic_projection": {}
        });

        let block = parse_block_value(raw).unwrap();
        match block {
            Block::Unsupported(unsupported) => {
                assert_eq!(unsupported.block_type, "holographic_projection");
                assert!(unsupported.common.has_children);
            }
            other => panic!("expected unsupported block, got {:?}", other),
        }
    }

    #[test]
    fn test_block_without_id_is_an_error() {
        let raw = serde_json::json!({ "object": "block", "type": "mystery" });
        assert!(parse_block_value(raw).is_err());
    }

    #[test]
    fn test_children_page_keeps_cursor() {
        let body = format!(
            r#"{{ "object": "list", "results": [{}], "next_cursor": "abc", "has_more": true }}"#,
            PARAGRAPH
        );

        let page = parse_blocks_pagination(ok_response(&body)).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
        assert!(page.has_more);
    }

    #[test]
    fn test_page_mention_target() {
        let raw = serde_json::json!({
            "object": "block",
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "parent": { "type": "page_id", "page_id": "59833787-2cf9-4fdf-8782-e53db20768a5" },
            "created_time": "2022-03-01T19:05:00.000Z",
            "last_edited_time": "2022-07-06T19:41:00.000Z",
            "created_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
            "last_edited_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
            "has_children": false,
            "archived": false,
            "type": "paragraph",
            "paragraph": {
                "rich_text": [{
                    "type": "mention",
                    "mention": {
                        "type": "page",
                        "page": { "id": "3c612f56-fdd0-4a30-a4d6-bda7d7426309" }
                    },
                    "annotations": {
                        "bold": false, "italic": false, "strikethrough": false,
                        "underline": false, "code": false, "color": "default"
                    },
                    "plain_text": "Roadmap",
                    "href": "https://www.notion.so/3c612f56fdd04a30a4d6bda7d7426309"
                }],
                "color": "default"
            }
        });

        let block = parse_block_value(raw).unwrap();
        let spans = block.rich_text().unwrap();
        match &spans[0].text_type {
            RichTextType::Mention(data) => match &data.mention_type {
                MentionType::Page { id } => {
                    assert_eq!(id.as_str(), "3c612f56fdd04a30a4d6bda7d7426309")
                }
                other => panic!("expected page mention, got {:?}", other),
            },
            other => panic!("expected mention, got {:?}", other),
        }
    }

    #[test]
    fn test_body_preview_truncates_on_char_boundary() {
        let body = "é".repeat(600);
        let preview = body_preview(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), BODY_PREVIEW_LEN + 3);
    }
}
