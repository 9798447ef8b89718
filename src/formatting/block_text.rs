// src/formatting/block_text.rs
//! Maps one block to its line of text.
//!
//! This is the per-block half of flattening: it never fetches and never
//! fails. Recursion into children, child pages and tables is the walker's
//! job; those blocks map to an empty line here.

use super::rich_text::render_rich_text;
use super::state::ListCounters;
use crate::constants::{DIVIDER_MARKER, LIST_MARKER};
use crate::model::Block;

/// Renders `block` as it appears at nesting `depth` (1 for a page's
/// direct children).
///
/// Numbered items draw their number from `counters` at `depth`; every other
/// block type restarts numbering at that depth.
pub fn render_block(block: &Block, depth: usize, counters: &mut ListCounters) -> String {
    if !matches!(block, Block::NumberedListItem(_)) {
        counters.reset(depth);
    }

    match block {
        Block::NumberedListItem(b) => {
            let n = counters.take_next(depth);
            let text = render_rich_text(&b.content.rich_text);
            if depth > 1 {
                format!("{} {}. {}", list_prefix(depth), n, text)
            } else {
                format!("{}. {}", n, text)
            }
        }
        Block::BulletedListItem(b) => {
            format!(
                "{} {}",
                list_prefix(depth),
                render_rich_text(&b.content.rich_text)
            )
        }
        Block::Heading1(b) => format!("# {}", render_rich_text(&b.content.rich_text)),
        Block::Heading2(b) => format!("## {}", render_rich_text(&b.content.rich_text)),
        Block::Heading3(b) => format!("### {}", render_rich_text(&b.content.rich_text)),
        Block::Paragraph(b) => render_rich_text(&b.content.rich_text),
        Block::ToDo(b) => {
            let marker = if b.checked { "- [x]" } else { "- [ ]" };
            format!("{} {}", marker, render_rich_text(&b.content.rich_text))
        }
        Block::Toggle(b) => format!(
            "<details><summary>{}</summary></details>",
            render_rich_text(&b.content.rich_text)
        ),
        Block::Code(b) => format!("```\n{}\n```", render_rich_text(&b.content.rich_text)),
        Block::Quote(b) | Block::Callout(b) => {
            format!("> {}", render_rich_text(&b.content.rich_text))
        }
        Block::Image(b) => format!("![Image]({})", b.source.url()),
        Block::Video(b) => format!("[Video]({})", b.source.url()),
        Block::File(b) => format!("[File]({})", b.source.url()),
        Block::Pdf(b) => format!("[PDF]({})", b.source.url()),
        Block::Bookmark(b) => format!("[Bookmark]({})", b.url),
        Block::Embed(b) => format!("[Embed]({})", b.url),
        Block::LinkPreview(b) => format!("[Link Preview]({})", b.url),
        Block::Divider(_) => DIVIDER_MARKER.to_string(),
        Block::Table(_)
        | Block::TableRow(_)
        | Block::ColumnList(_)
        | Block::Column(_)
        | Block::ChildPage(_)
        | Block::ChildDatabase(_)
        | Block::Unsupported(_) => String::new(),
    }
}

fn list_prefix(depth: usize) -> String {
    std::iter::repeat(LIST_MARKER).take(depth).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BlockCommon, ChildPageBlock, LinkBlock, MediaBlock, PlainBlock, TextBlock, ToDoBlock,
        UnsupportedBlock,
    };
    use crate::model::blocks::TextBlockContent;
    use crate::types::RichTextItem;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Vec<RichTextItem> {
        vec![RichTextItem::plain_text(s)]
    }

    fn numbered(s: &str) -> Block {
        Block::NumberedListItem(TextBlock::new(BlockCommon::default(), text(s)))
    }

    fn paragraph(s: &str) -> Block {
        Block::Paragraph(TextBlock::new(BlockCommon::default(), text(s)))
    }

    fn render_all(blocks: &[Block], depth: usize) -> Vec<String> {
        let mut counters = ListCounters::new();
        blocks
            .iter()
            .map(|b| render_block(b, depth, &mut counters))
            .collect()
    }

    #[test]
    fn test_five_numbered_items() {
        let blocks: Vec<Block> = ["a", "b", "c", "d", "e"].iter().map(|s| numbered(s)).collect();
        assert_eq!(
            render_all(&blocks, 1),
            vec!["1. a", "2. b", "3. c", "4. d", "5. e"]
        );
    }

    #[test]
    fn test_paragraph_restarts_numbering() {
        let blocks = vec![
            numbered("a"),
            numbered("b"),
            paragraph("break"),
            numbered("c"),
        ];
        assert_eq!(render_all(&blocks, 1), vec!["1. a", "2. b", "break", "1. c"]);
    }

    #[test]
    fn test_nested_numbered_item_prefix() {
        let blocks = vec![numbered("deep"), numbered("deeper")];
        assert_eq!(render_all(&blocks, 3), vec!["--- 1. deep", "--- 2. deeper"]);
    }

    #[test]
    fn test_bulleted_prefix_repeats_per_depth() {
        let item = Block::BulletedListItem(TextBlock::new(BlockCommon::default(), text("x")));
        let mut counters = ListCounters::new();
        assert_eq!(render_block(&item, 1, &mut counters), "- x");
        assert_eq!(render_block(&item, 2, &mut counters), "-- x");
    }

    #[test]
    fn test_text_block_markup() {
        let mut counters = ListCounters::new();
        let common = BlockCommon::default;

        let cases = vec![
            (Block::Heading1(TextBlock::new(common(), text("T"))), "# T"),
            (Block::Heading2(TextBlock::new(common(), text("T"))), "## T"),
            (Block::Heading3(TextBlock::new(common(), text("T"))), "### T"),
            (
                Block::Toggle(TextBlock::new(common(), text("more"))),
                "<details><summary>more</summary></details>",
            ),
            (Block::Quote(TextBlock::new(common(), text("q"))), "> q"),
            (Block::Callout(TextBlock::new(common(), text("c"))), "> c"),
        ];

        for (block, expected) in cases {
            assert_eq!(render_block(&block, 1, &mut counters), expected);
        }
    }

    #[test]
    fn test_todo_checkbox() {
        let mut counters = ListCounters::new();
        let done = Block::ToDo(ToDoBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(text("ship")),
            checked: true,
        });
        let open = Block::ToDo(ToDoBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(text("test")),
            checked: false,
        });
        assert_eq!(render_block(&done, 1, &mut counters), "- [x] ship");
        assert_eq!(render_block(&open, 1, &mut counters), "- [ ] test");
    }

    #[test]
    fn test_code_is_fenced_without_language() {
        let block = Block::Code(crate::model::CodeBlock {
            common: BlockCommon::default(),
            language: "rust".to_string(),
            content: TextBlockContent::new(text("fn main() {}")),
        });
        assert_eq!(
            render_block(&block, 1, &mut ListCounters::new()),
            "```\nfn main() {}\n```"
        );
    }

    #[test]
    fn test_media_and_link_markup() {
        let mut counters = ListCounters::new();
        let url = "https://example.com/a.png";
        let link = |url: &str| LinkBlock {
            common: BlockCommon::default(),
            url: url.to_string(),
        };

        let cases = vec![
            (
                Block::Image(MediaBlock::external(BlockCommon::default(), url)),
                format!("![Image]({})", url),
            ),
            (
                Block::Video(MediaBlock::external(BlockCommon::default(), url)),
                format!("[Video]({})", url),
            ),
            (
                Block::File(MediaBlock::external(BlockCommon::default(), url)),
                format!("[File]({})", url),
            ),
            (
                Block::Pdf(MediaBlock::external(BlockCommon::default(), url)),
                format!("[PDF]({})", url),
            ),
            (Block::Bookmark(link(url)), format!("[Bookmark]({})", url)),
            (Block::Embed(link(url)), format!("[Embed]({})", url)),
            (
                Block::LinkPreview(link(url)),
                format!("[Link Preview]({})", url),
            ),
        ];

        for (block, expected) in cases {
            assert_eq!(render_block(&block, 1, &mut counters), expected);
        }
    }

    #[test]
    fn test_structural_blocks_render_empty() {
        let mut counters = ListCounters::new();
        let blocks = vec![
            Block::ColumnList(PlainBlock::default()),
            Block::Column(PlainBlock::default()),
            Block::ChildPage(ChildPageBlock {
                common: BlockCommon::default(),
                title: "Sub".to_string(),
            }),
            Block::Unsupported(UnsupportedBlock {
                common: BlockCommon::default(),
                block_type: "breadcrumb".to_string(),
            }),
        ];
        for block in &blocks {
            assert_eq!(render_block(block, 1, &mut counters), "");
        }
        assert_eq!(
            render_block(&Block::Divider(PlainBlock::default()), 1, &mut counters),
            DIVIDER_MARKER
        );
    }

    #[test]
    fn test_structural_block_also_restarts_numbering() {
        let blocks = vec![
            numbered("a"),
            Block::Divider(PlainBlock::default()),
            numbered("b"),
        ];
        assert_eq!(
            render_all(&blocks, 1),
            vec!["1. a", DIVIDER_MARKER, "1. b"]
        );
    }
}
