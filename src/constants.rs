// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many children the Notion API returns per page of results.
///
/// 100 is the API maximum.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Attempts per request before a transient failure becomes terminal.
pub const NOTION_REQUEST_ATTEMPTS: u32 = 3;

/// First backoff delay after a transient failure, in milliseconds.
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;

/// Upper bound on the backoff delay, in milliseconds.
pub const RETRY_MAX_DELAY_MS: u64 = 8_000;

// ---------------------------------------------------------------------------
// Page classification
// ---------------------------------------------------------------------------

/// Page property whose value (`context`, `prompt` or `profile`) decides
/// which aggregate bucket a page lands in.
pub const DEFAULT_TAG_PROPERTY: &str = "FlowExtType";

/// The profile used when no page is tagged `profile`.
pub const DEFAULT_PROFILE: &str = "You are a helpful assistant. Always answer in markdown.";

// ---------------------------------------------------------------------------
// Titles given to pages reached during the walk
// ---------------------------------------------------------------------------

pub const ROOT_PAGE_TITLE: &str = "Root Page";
pub const CHILD_PAGE_TITLE_PREFIX: &str = "Attached Page: ";
pub const MENTIONED_PAGE_TITLE_PREFIX: &str = "Mentioned Page: ";

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// Line emitted for a divider block.
pub const DIVIDER_MARKER: &str = "------------------------------";

/// Character repeated `depth` times in front of nested list items.
pub const LIST_MARKER: char = '-';

// ---------------------------------------------------------------------------
// Conversation budget
// ---------------------------------------------------------------------------

/// Rough characters-per-token ratio for estimating prompt size.
pub const CHARS_PER_TOKEN: usize = 4;

/// Context window the conversation seed must fit into by default.
pub const DEFAULT_MAX_TOKENS: usize = 128_000;
