// src/formatting/rich_text/annotations.rs
//! Application of inline annotations to span content.

use crate::types::Annotations;

/// Renderer for annotations to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Wraps `content` for each active annotation.
    ///
    /// The order is fixed: bold, italic, strikethrough, underline, code.
    /// Each wrap encloses the previous result, so code ends up outermost.
    pub fn apply_styles(content: &str, annotations: &Annotations) -> String {
        let mut result = content.to_string();

        if annotations.bold {
            result = format!("**{}**", result);
        }

        if annotations.italic {
            result = format!("*{}*", result);
        }

        if annotations.strikethrough {
            result = format!("~~{}~~", result);
        }

        // No markdown syntax for underline
        if annotations.underline {
            result = format!("<u>{}</u>", result);
        }

        if annotations.code {
            result = format!("`{}`", result);
        }

        result
    }
}
