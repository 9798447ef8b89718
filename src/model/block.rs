use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichTextItem};
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::LinkPreview($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// The closed set of Notion block types this crate understands.
///
/// Anything else arrives as [`Block::Unsupported`] carrying the raw type
/// name, so the walker can log and skip it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDoBlock),
    Toggle(TextBlock),
    Code(CodeBlock),
    Quote(TextBlock),
    Callout(TextBlock),
    Image(MediaBlock),
    Video(MediaBlock),
    File(MediaBlock),
    Pdf(MediaBlock),
    Bookmark(LinkBlock),
    Embed(LinkBlock),
    LinkPreview(LinkBlock),
    Divider(PlainBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(PlainBlock),
    Column(PlainBlock),
    ChildPage(ChildPageBlock),
    ChildDatabase(ChildDatabaseBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    pub fn id(&self) -> &BlockId {
        &self.common().id
    }

    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// The inline spans of a rich-text-bearing block, or `None` for
    /// blocks that carry no text payload.
    pub fn rich_text(&self) -> Option<&[RichTextItem]> {
        match self {
            Block::Paragraph(b)
            | Block::Heading1(b)
            | Block::Heading2(b)
            | Block::Heading3(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Toggle(b)
            | Block::Quote(b)
            | Block::Callout(b) => Some(&b.content.rich_text),
            Block::ToDo(b) => Some(&b.content.rich_text),
            Block::Code(b) => Some(&b.content.rich_text),
            _ => None,
        }
    }

    /// Get block type name as Notion spells it.
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Code(_) => "code",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Image(_) => "image",
            Block::Video(_) => "video",
            Block::File(_) => "file",
            Block::Pdf(_) => "pdf",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
            Block::LinkPreview(_) => "link_preview",
            Block::Divider(_) => "divider",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::ChildPage(_) => "child_page",
            Block::ChildDatabase(_) => "child_database",
            Block::Unsupported(b) => &b.block_type,
        }
    }
}
