// tests/support/mod.rs
//! In-memory Notion workspace for walker tests.

#![allow(dead_code)]

use notion2context::{
    AppError, Block, BlockCommon, BlockId, ChildPageBlock, LinkBlock, MentionData, MentionType,
    NotionErrorCode, NotionId, NotionRepository, PageId, PageMetadata, PaginatedResponse,
    PlainBlock, PropertyValue, RichTextItem, RichTextType, TableBlock, TableRowBlock, TextBlock,
};
use notion2context::constants::DEFAULT_TAG_PROPERTY;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// A deterministic ID for test object `n`.
pub fn id(n: u32) -> NotionId {
    NotionId::parse(&format!("{:032x}", n)).unwrap()
}

fn common(n: u32) -> BlockCommon {
    BlockCommon::new(BlockId::parse(id(n).as_str()).unwrap())
}

pub fn paragraph(n: u32, text: &str) -> Block {
    Block::Paragraph(TextBlock::new(common(n), vec![RichTextItem::plain_text(text)]))
}

pub fn numbered(n: u32, text: &str) -> Block {
    Block::NumberedListItem(TextBlock::new(common(n), vec![RichTextItem::plain_text(text)]))
}

pub fn bulleted(n: u32, text: &str) -> Block {
    Block::BulletedListItem(TextBlock::new(common(n), vec![RichTextItem::plain_text(text)]))
}

/// A bulleted item whose children are listed under its own ID.
pub fn bulleted_parent(n: u32, text: &str) -> Block {
    Block::BulletedListItem(TextBlock::new(
        common(n).with_children(),
        vec![RichTextItem::plain_text(text)],
    ))
}

/// A numbered item whose children are listed under its own ID.
pub fn numbered_parent(n: u32, text: &str) -> Block {
    Block::NumberedListItem(TextBlock::new(
        common(n).with_children(),
        vec![RichTextItem::plain_text(text)],
    ))
}

pub fn child_page(page: u32, title: &str) -> Block {
    Block::ChildPage(ChildPageBlock {
        common: common(page).with_children(),
        title: title.to_string(),
    })
}

/// A paragraph that mentions page `target`.
pub fn mention(n: u32, target: u32, label: &str) -> Block {
    Block::Paragraph(TextBlock::new(
        common(n),
        vec![
            RichTextItem::plain_text("see"),
            RichTextItem::page_mention(id(target), label),
        ],
    ))
}

/// A paragraph whose span links to `href` through a mention without a
/// direct page target.
pub fn href_mention(n: u32, href: &str, label: &str) -> Block {
    let span = RichTextItem {
        text_type: RichTextType::Mention(MentionData {
            mention_type: MentionType::LinkPreview {
                url: href.to_string(),
            },
        }),
        annotations: Default::default(),
        plain_text: label.to_string(),
        href: Some(href.to_string()),
    };
    Block::Paragraph(TextBlock::new(common(n), vec![span]))
}

pub fn table(n: u32, has_column_header: bool) -> Block {
    Block::Table(TableBlock {
        common: common(n).with_children(),
        table_width: 2,
        has_column_header,
        has_row_header: false,
    })
}

pub fn table_row(n: u32, cells: &[&str]) -> Block {
    Block::TableRow(TableRowBlock {
        common: common(n),
        cells: cells
            .iter()
            .map(|c| vec![RichTextItem::plain_text(c)])
            .collect(),
    })
}

pub fn column_list(n: u32) -> Block {
    Block::ColumnList(PlainBlock {
        common: common(n).with_children(),
    })
}

pub fn column(n: u32) -> Block {
    Block::Column(PlainBlock {
        common: common(n).with_children(),
    })
}

pub fn divider(n: u32) -> Block {
    Block::Divider(PlainBlock { common: common(n) })
}

pub fn bookmark(n: u32, url: &str) -> Block {
    Block::Bookmark(LinkBlock {
        common: common(n),
        url: url.to_string(),
    })
}

fn not_found(what: &str, id: &NotionId) -> AppError {
    AppError::NotionService {
        code: NotionErrorCode::ObjectNotFound,
        message: format!("{} {} not found", what, id),
        status: reqwest::StatusCode::NOT_FOUND,
    }
}

/// A workspace held in memory.
///
/// Objects without registered children list as empty; pages without
/// registered metadata have no properties.
#[derive(Default)]
pub struct FakeNotion {
    children: HashMap<NotionId, Vec<Block>>,
    metadata: HashMap<NotionId, PageMetadata>,
    failing_children: HashSet<NotionId>,
    failing_metadata: HashSet<NotionId>,
    failing_tables: HashSet<NotionId>,
    server_page_size: Option<usize>,
    children_requests: Mutex<Vec<(NotionId, Option<String>)>>,
}

impl FakeNotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(mut self, parent: u32, blocks: Vec<Block>) -> Self {
        self.children.insert(id(parent), blocks);
        self
    }

    /// Tags page `page` through the default tag property.
    pub fn with_tag(mut self, page: u32, tag: &str) -> Self {
        let metadata = PageMetadata::new(PageId::parse(id(page).as_str()).unwrap(), "page")
            .with_property(
                DEFAULT_TAG_PROPERTY,
                PropertyValue::RichText(vec![RichTextItem::plain_text(tag)]),
            );
        self.metadata.insert(id(page), metadata);
        self
    }

    pub fn failing_children(mut self, parent: u32) -> Self {
        self.failing_children.insert(id(parent));
        self
    }

    pub fn failing_metadata(mut self, page: u32) -> Self {
        self.failing_metadata.insert(id(page));
        self
    }

    pub fn failing_table(mut self, table: u32) -> Self {
        self.failing_tables.insert(id(table));
        self
    }

    /// Serve at most `size` children per response regardless of the
    /// requested page size.
    pub fn with_server_page_size(mut self, size: usize) -> Self {
        self.server_page_size = Some(size);
        self
    }

    /// Every children request made so far, in order.
    pub fn children_requests(&self) -> Vec<(NotionId, Option<String>)> {
        self.children_requests.lock().unwrap().clone()
    }

    /// How many times the children of `parent` were requested from the start.
    pub fn listings_of(&self, parent: u32) -> usize {
        let parent = id(parent);
        self.children_requests()
            .iter()
            .filter(|(p, cursor)| *p == parent && cursor.is_none())
            .count()
    }
}

#[async_trait::async_trait]
impl NotionRepository for FakeNotion {
    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<String>,
        page_size: u32,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        self.children_requests
            .lock()
            .unwrap()
            .push((parent.clone(), cursor.clone()));

        if self.failing_children.contains(parent) {
            return Err(not_found("block", parent));
        }

        let all = self.children.get(parent).cloned().unwrap_or_default();
        let start: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
        let size = self.server_page_size.unwrap_or(page_size as usize);
        let end = (start + size).min(all.len());
        let has_more = end < all.len();

        Ok(PaginatedResponse {
            results: all[start..end].to_vec(),
            next_cursor: has_more.then(|| end.to_string()),
            has_more,
        })
    }

    async fn retrieve_page_metadata(&self, page: &NotionId) -> Result<PageMetadata, AppError> {
        if self.failing_metadata.contains(page) {
            return Err(not_found("page", page));
        }
        Ok(self.metadata.get(page).cloned().unwrap_or_else(|| {
            PageMetadata::new(PageId::parse(page.as_str()).unwrap(), "Untitled")
        }))
    }

    async fn retrieve_table_rows(&self, table: &NotionId) -> Result<Vec<Block>, AppError> {
        if self.failing_tables.contains(table) {
            return Err(not_found("table", table));
        }
        Ok(self.children.get(table).cloned().unwrap_or_default())
    }
}
