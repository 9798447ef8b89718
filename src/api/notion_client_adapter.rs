// src/api/notion_client_adapter.rs
//! Converts `notion-client` response types into the domain model.

use crate::error::{AppError, NotionClientError};
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::{Block, PageMetadata, PropertyValue};
use crate::types::{
    Annotations, BlockId, EquationData, Link, MentionData, MentionType, NotionId, PageId,
    PropertyName, RichTextItem, RichTextType,
};
use notion_client::objects::rich_text::RichText as NcRichText;
use serde_json::Value;
use std::collections::HashMap;

/// Convert a notion-client Block into a domain [`Block`].
///
/// Block kinds without a domain counterpart become [`Block::Unsupported`].
pub fn convert_block(
    notion_block: notion_client::objects::block::Block,
) -> Result<Block, AppError> {
    use notion_client::objects::block::BlockType;

    let common = convert_block_common(&notion_block)?;

    let block = match notion_block.block_type {
        BlockType::Paragraph { paragraph } => {
            Block::Paragraph(text_block(common, paragraph.rich_text))
        }
        BlockType::Heading1 { heading_1 } => {
            Block::Heading1(text_block(common, heading_1.rich_text))
        }
        BlockType::Heading2 { heading_2 } => {
            Block::Heading2(text_block(common, heading_2.rich_text))
        }
        BlockType::Heading3 { heading_3 } => {
            Block::Heading3(text_block(common, heading_3.rich_text))
        }
        BlockType::BulletedListItem { bulleted_list_item } => {
            Block::BulletedListItem(text_block(common, bulleted_list_item.rich_text))
        }
        BlockType::NumberedListItem { numbered_list_item } => {
            Block::NumberedListItem(text_block(common, numbered_list_item.rich_text))
        }
        BlockType::ToDo { to_do } => Block::ToDo(ToDoBlock {
            common,
            content: TextBlockContent::new(convert_rich_text_array(to_do.rich_text)),
            checked: to_do.checked.unwrap_or(false),
        }),
        BlockType::Toggle { toggle } => Block::Toggle(text_block(common, toggle.rich_text)),
        BlockType::Quote { quote } => Block::Quote(text_block(common, quote.rich_text)),
        BlockType::Callout { callout } => Block::Callout(text_block(common, callout.rich_text)),
        BlockType::Code { code } => Block::Code(CodeBlock {
            common,
            language: format!("{:?}", code.language).to_lowercase(),
            content: TextBlockContent::new(convert_rich_text_array(code.rich_text)),
        }),

        BlockType::Image { image } => Block::Image(MediaBlock {
            common,
            source: convert_file_object(image.file_type),
        }),
        BlockType::Video { video } => Block::Video(MediaBlock {
            common,
            source: convert_file_object(video.file_type),
        }),
        BlockType::File { file } => Block::File(MediaBlock {
            common,
            source: convert_file_object(file.file_type),
        }),
        BlockType::Pdf { pdf } => Block::Pdf(MediaBlock {
            common,
            source: convert_file_object(pdf.file_type),
        }),
        BlockType::Bookmark { bookmark } => Block::Bookmark(LinkBlock {
            common,
            url: bookmark.url,
        }),
        BlockType::Embed { embed } => Block::Embed(LinkBlock {
            common,
            url: embed.url,
        }),
        BlockType::LinkPreview { link_preview } => Block::LinkPreview(LinkBlock {
            common,
            url: link_preview.url,
        }),

        BlockType::Divider { .. } => Block::Divider(PlainBlock { common }),
        BlockType::ColumnList { .. } => Block::ColumnList(PlainBlock { common }),
        BlockType::Column { .. } => Block::Column(PlainBlock { common }),

        BlockType::Table { table } => Block::Table(TableBlock {
            common,
            table_width: table.table_width as usize,
            has_column_header: table.has_column_header,
            has_row_header: table.has_row_header,
        }),
        BlockType::TableRow { table_row } => Block::TableRow(TableRowBlock {
            common,
            cells: table_row
                .cells
                .into_iter()
                .map(convert_rich_text_array)
                .collect(),
        }),

        BlockType::ChildPage { child_page } => Block::ChildPage(ChildPageBlock {
            common,
            title: child_page.title,
        }),
        BlockType::ChildDatabase { child_database } => {
            Block::ChildDatabase(ChildDatabaseBlock {
                common,
                title: child_database.title,
            })
        }

        // The raw type name is filled in by the parser, which still has the JSON.
        _ => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: "unsupported".to_string(),
        }),
    };

    Ok(block)
}

/// Builds an unsupported block straight from raw block JSON.
///
/// Used when `notion-client` cannot decode a block at all; only the `id`
/// is required.
pub fn convert_raw_unsupported(raw: &Value, block_type: &str) -> Result<Block, AppError> {
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| NotionClientError::ConversionError {
            message: format!("Block of type '{}' has no id", block_type),
        })?;

    Ok(Block::Unsupported(UnsupportedBlock {
        common: BlockCommon {
            id: BlockId::parse(id)?,
            has_children: raw
                .get("has_children")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        },
        block_type: block_type.to_string(),
    }))
}

/// Convert a notion-client Page into the metadata used for classification.
pub fn convert_page_metadata(
    notion_page: notion_client::objects::page::Page,
) -> Result<PageMetadata, AppError> {
    use notion_client::objects::page::PageProperty;

    let id = PageId::parse(&notion_page.id)?;
    let mut title = String::new();
    let mut properties = HashMap::new();

    for (name, property) in notion_page.properties {
        let value = match property {
            PageProperty::Title { title: spans, .. } => {
                let spans = convert_rich_text_array(spans);
                title = spans.iter().map(|s| s.plain_text.as_str()).collect();
                PropertyValue::Title(spans)
            }
            PageProperty::RichText { rich_text, .. } => {
                PropertyValue::RichText(convert_rich_text_array(rich_text))
            }
            PageProperty::Select { select, .. } => {
                PropertyValue::Select(select.and_then(|option| option.name))
            }
            PageProperty::Status { status, .. } => {
                PropertyValue::Select(status.and_then(|option| option.name))
            }
            _ => PropertyValue::Other,
        };
        properties.insert(PropertyName::new(name), value);
    }

    Ok(PageMetadata {
        id,
        title,
        properties,
    })
}

fn convert_block_common(
    notion_block: &notion_client::objects::block::Block,
) -> Result<BlockCommon, AppError> {
    let id = notion_block
        .id
        .as_deref()
        .ok_or_else(|| NotionClientError::ConversionError {
            message: "Block missing required ID field".to_string(),
        })?;

    Ok(BlockCommon {
        id: BlockId::parse(id)?,
        has_children: notion_block.has_children.unwrap_or(false),
    })
}

fn text_block(common: BlockCommon, rich_text: Vec<NcRichText>) -> TextBlock {
    TextBlock::new(common, convert_rich_text_array(rich_text))
}

fn convert_rich_text_array(rich_texts: Vec<NcRichText>) -> Vec<RichTextItem> {
    rich_texts.into_iter().map(convert_rich_text).collect()
}

fn convert_rich_text(rich_text: NcRichText) -> RichTextItem {
    match rich_text {
        NcRichText::Text {
            text,
            annotations,
            plain_text,
            href,
        } => RichTextItem {
            text_type: RichTextType::Text {
                content: text.content,
                link: text.link.map(|link| Link { url: link.url }),
            },
            annotations: annotations.map(convert_annotations).unwrap_or_default(),
            plain_text: plain_text.unwrap_or_default(),
            href,
        },

        NcRichText::Mention {
            mention,
            annotations,
            plain_text,
            href,
        } => RichTextItem {
            text_type: RichTextType::Mention(MentionData {
                mention_type: convert_mention(mention),
            }),
            annotations: convert_annotations(annotations),
            plain_text,
            href,
        },

        NcRichText::Equation {
            equation,
            annotations,
            plain_text,
            href,
        } => RichTextItem {
            text_type: RichTextType::Equation(EquationData {
                expression: equation.expression,
            }),
            annotations: convert_annotations(annotations),
            plain_text,
            href,
        },

        _ => RichTextItem::plain_text(""),
    }
}

fn convert_annotations(annotations: notion_client::objects::rich_text::Annotations) -> Annotations {
    Annotations {
        bold: annotations.bold,
        italic: annotations.italic,
        strikethrough: annotations.strikethrough,
        underline: annotations.underline,
        code: annotations.code,
    }
}

/// Mentions whose target cannot be parsed degrade to [`MentionType::Other`];
/// the span's `href` is kept either way.
fn convert_mention(mention: notion_client::objects::rich_text::Mention) -> MentionType {
    use notion_client::objects::rich_text::Mention as NcMention;

    let parse_target = |raw: &str| {
        NotionId::parse(raw)
            .map_err(|e| log::debug!("Ignoring mention target '{}': {}", raw, e))
            .ok()
    };

    match mention {
        NcMention::Page { page } => parse_target(&page.id)
            .map(|id| MentionType::Page { id })
            .unwrap_or(MentionType::Other),
        NcMention::Database { database } => parse_target(&database.id)
            .map(|id| MentionType::Database { id })
            .unwrap_or(MentionType::Other),
        NcMention::User { user } => MentionType::User {
            id: user.id,
            name: user.name,
        },
        NcMention::LinkPreview { link_preview } => MentionType::LinkPreview {
            url: link_preview.url,
        },
        _ => MentionType::Other,
    }
}

fn convert_file_object(file: notion_client::objects::file::File) -> FileObject {
    use notion_client::objects::file::File as NcFile;

    match file {
        NcFile::External { external } => FileObject::External {
            external: ExternalFile { url: external.url },
        },
        NcFile::File { file } => FileObject::File {
            file: NotionFile { url: file.url },
        },
    }
}
