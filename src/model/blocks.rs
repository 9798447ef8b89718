use super::common::BlockCommon;
use crate::types::RichTextItem;
use serde::{Deserialize, Serialize};

/// Text content shared by every rich-text-bearing block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self { rich_text }
    }
}

/// A block whose only payload is rich text (paragraph, headings, list
/// items, toggle, quote, callout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TextBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

impl TextBlock {
    pub fn new(common: BlockCommon, rich_text: Vec<RichTextItem>) -> Self {
        Self {
            common,
            content: TextBlockContent::new(rich_text),
        }
    }
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Code block. The language is kept but not rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub content: TextBlockContent,
}

/// File object for media blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileObject {
    #[serde(rename = "external")]
    External { external: ExternalFile },
    #[serde(rename = "file")]
    File { file: NotionFile },
}

impl FileObject {
    pub fn url(&self) -> &str {
        match self {
            FileObject::External { external } => &external.url,
            FileObject::File { file } => &file.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

/// A file hosted by Notion; the URL is signed and expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotionFile {
    pub url: String,
}

/// Image, video, file or PDF block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaBlock {
    pub common: BlockCommon,
    pub source: FileObject,
}

impl MediaBlock {
    pub fn external(common: BlockCommon, url: &str) -> Self {
        Self {
            common,
            source: FileObject::External {
                external: ExternalFile {
                    url: url.to_string(),
                },
            },
        }
    }
}

/// Bookmark, embed or link preview block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkBlock {
    pub common: BlockCommon,
    pub url: String,
}

/// Child page block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildPageBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Child database block. Databases are not traversed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildDatabaseBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Table block; its rows are separate `table_row` children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
}

/// Table row block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Block with no payload of its own (divider, column list, column).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlainBlock {
    pub common: BlockCommon,
}

/// A block type outside the supported set, kept so it can be reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}
