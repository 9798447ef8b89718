use crate::types::{PageId, PropertyName, RichTextItem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The properties of a page, as far as classification needs them.
///
/// Only text-like property kinds are modelled; every other kind is kept as
/// [`PropertyValue::Other`] so its presence is still visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub id: PageId,
    pub title: String,
    pub properties: HashMap<PropertyName, PropertyValue>,
}

impl PageMetadata {
    pub fn new(id: PageId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, name: &str, value: PropertyValue) -> Self {
        self.properties.insert(PropertyName::new(name), value);
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Title(Vec<RichTextItem>),
    RichText(Vec<RichTextItem>),
    Select(Option<String>),
    Other,
}

impl PropertyValue {
    /// The leading text of the property: the first span's plain text for
    /// text kinds, the option name for selects.
    pub fn leading_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Title(spans) | PropertyValue::RichText(spans) => {
                spans.first().map(|span| span.plain_text.as_str())
            }
            PropertyValue::Select(option) => option.as_deref(),
            PropertyValue::Other => None,
        }
    }
}
