use super::PageMetadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role a page plays in the aggregate.
///
/// Read from a dedicated page property. Anything absent, empty or
/// unrecognized classifies as [`PageTag::Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageTag {
    #[default]
    Context,
    Prompt,
    Profile,
}

impl PageTag {
    /// Classifies a page from the named property of its metadata.
    pub fn from_metadata(metadata: &PageMetadata, property: &str) -> Self {
        let Some(raw) = metadata
            .property(property)
            .and_then(|value| value.leading_text())
        else {
            return PageTag::default();
        };

        raw.parse().unwrap_or_else(|_| {
            log::warn!(
                "Page {} has unrecognized {} value '{}', treating as context",
                metadata.id,
                property,
                raw
            );
            PageTag::default()
        })
    }
}

impl FromStr for PageTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "context" => Ok(PageTag::Context),
            "prompt" => Ok(PageTag::Prompt),
            "profile" => Ok(PageTag::Profile),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for PageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTag::Context => write!(f, "context"),
            PageTag::Prompt => write!(f, "prompt"),
            PageTag::Profile => write!(f, "profile"),
        }
    }
}
