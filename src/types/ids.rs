use super::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Strong typing for IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockMarker;

pub type PageId = Id<PageMarker>;
pub type BlockId = Id<BlockMarker>;

impl<T> Id<T> {
    /// Parse a bare, dashed or URL-embedded Notion ID.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let id = NotionId::parse(input)?;
        Ok(Self {
            value: id.0,
            _phantom: PhantomData,
        })
    }

    /// Create a new random v4 UUID ID
    pub fn new_v4() -> Self {
        Self {
            value: Uuid::new_v4().as_simple().to_string(),
            _phantom: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// NotionId - A general-purpose Notion ID that can represent any type of object.
///
/// Stored as 32 lowercase hex characters; use [`NotionId::to_hyphenated`]
/// when building API paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotionId(String);

impl NotionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hyphenated UUID format for API compatibility.
    pub fn to_hyphenated(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            &self.0[0..8],
            &self.0[8..12],
            &self.0[12..16],
            &self.0[16..20],
            &self.0[20..32]
        )
    }

    fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        if hex.len() == 32 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(NotionId(hex.to_lowercase()))
        } else {
            Err(ValidationError::InvalidId(format!(
                "Invalid Notion ID format: {}",
                hex
            )))
        }
    }

    /// Parses various Notion ID formats.
    ///
    /// Accepts a dashed UUID, a bare 32-character hex ID, or a Notion URL
    /// such as `https://www.notion.so/Workspace/Title-<id>?v=...`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim().trim_end_matches('/');

        if let Ok(uuid) = Uuid::parse_str(cleaned) {
            return Ok(NotionId(uuid.as_simple().to_string()));
        }

        if cleaned.len() == 32 && cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::from_hex(cleaned);
        }

        if cleaned.contains("notion") {
            return Self::extract_from_url(cleaned);
        }

        Err(ValidationError::InvalidId(format!(
            "Could not parse Notion ID from: {}",
            input
        )))
    }

    /// Reads an ID out of a single URL path segment.
    ///
    /// Notion page slugs look like `Some-Title-<32 hex>`; a bare ID or a
    /// dashed UUID is accepted too.
    pub fn from_path_segment(segment: &str) -> Result<Self, ValidationError> {
        if let Ok(id) = Self::parse(segment) {
            return Ok(id);
        }
        match segment.rsplit('-').next() {
            Some(tail) if tail.len() == 32 => Self::from_hex(tail),
            _ => Err(ValidationError::InvalidId(format!(
                "No Notion ID in path segment: {}",
                segment
            ))),
        }
    }

    fn extract_from_url(url: &str) -> Result<Self, ValidationError> {
        lazy_static::lazy_static! {
            static ref ID_REGEX: Regex = Regex::new(
                r"(?:[/-])([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})(?:[/?#]|$)"
            ).expect("Failed to compile Notion ID regex - this is a bug in the code");
        }

        if let Some(id_match) = ID_REGEX.captures(url).and_then(|c| c.get(1)) {
            return Self::from_hex(&id_match.as_str().replace('-', ""));
        }

        Err(ValidationError::InvalidId(format!(
            "No valid ID found in URL: {}",
            url
        )))
    }
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NotionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NotionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NotionId::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl From<&PageId> for NotionId {
    fn from(id: &PageId) -> Self {
        NotionId(id.as_str().to_string())
    }
}

impl From<&BlockId> for NotionId {
    fn from(id: &BlockId) -> Self {
        NotionId(id.as_str().to_string())
    }
}
