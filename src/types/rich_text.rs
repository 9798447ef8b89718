use super::NotionId;
use serde::{Deserialize, Serialize};

/// The kind of rich text content.
///
/// Each variant carries its specific data: a mention always has mention
/// data, an equation always has an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RichTextType {
    Text { content: String, link: Option<Link> },
    Mention(MentionData),
    Equation(EquationData),
}

/// One inline span of a block's text, with its formatting annotations.
///
/// `plain_text` is the provider's unformatted rendering and is what table
/// cells and mention titles use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub text_type: RichTextType,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create an unannotated text span.
    pub fn plain_text(text: &str) -> Self {
        Self {
            text_type: RichTextType::Text {
                content: text.to_string(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// Create a mention span pointing at another page.
    pub fn page_mention(id: NotionId, title: &str) -> Self {
        Self {
            href: Some(format!("https://www.notion.so/{}", id.as_str())),
            text_type: RichTextType::Mention(MentionData {
                mention_type: MentionType::Page { id },
            }),
            annotations: Annotations::default(),
            plain_text: title.to_string(),
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn is_mention(&self) -> bool {
        matches!(self.text_type, RichTextType::Mention(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

/// The inline styles a span can carry. Colors are not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MentionData {
    pub mention_type: MentionType,
}

/// What a mention span points at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MentionType {
    Page { id: NotionId },
    Database { id: NotionId },
    User { id: String, name: Option<String> },
    LinkPreview { url: String },
    /// Dates, templates and any mention kind this client does not model.
    Other,
}

impl MentionType {
    /// The Notion object a mention refers to, when it refers to one directly.
    pub fn target_id(&self) -> Option<&NotionId> {
        match self {
            MentionType::Page { id } | MentionType::Database { id } => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquationData {
    pub expression: String,
}
