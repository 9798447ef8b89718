// src/formatting/rich_text/mod.rs
//! Renders a block's inline spans into one formatted line.

mod annotations;

use crate::types::{RichTextItem, RichTextType};
use annotations::MarkdownStyleRenderer;

/// Renders spans to Markdown.
///
/// Text spans with content and mention spans with plain text are styled
/// and each followed by a single space; the joined result is trimmed.
/// Spans with nothing to show, and equations, are skipped.
pub fn render_rich_text(items: &[RichTextItem]) -> String {
    let mut output = String::new();

    for item in items {
        if let Some(content) = renderable_content(item) {
            output.push_str(&MarkdownStyleRenderer::apply_styles(
                content,
                &item.annotations,
            ));
            output.push(' ');
        }
    }

    output.trim().to_string()
}

/// Concatenates the unstyled plain text of every span, separated by a space.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items
        .iter()
        .map(|item| item.plain_text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn renderable_content(item: &RichTextItem) -> Option<&str> {
    match &item.text_type {
        RichTextType::Text { content, .. } if !content.is_empty() => Some(content.as_str()),
        RichTextType::Mention(_) if !item.plain_text.is_empty() => Some(item.plain_text.as_str()),
        _ => None,
    }
}
