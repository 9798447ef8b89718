//! notion2context library: walks a Notion page tree into context, profile
//! and prompt buckets ready to seed a chat conversation.
//!
//! # Public API
//!
//! - **Error handling**: `AppError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `PipelineConfig`, `OutputFormat`
//! - **Domain model**: `Block` and its payloads, `PageMetadata`, `PageTag`
//! - **API client**: `NotionRepository`, `NotionHttpClient`, parsers
//! - **Walk**: `TreeWalker`, `WalkOptions`, `MentionPolicy`, `Aggregate`
//! - **Formatting**: `render_block`, `format_table_rows`, `render_aggregate`
//! - **Conversation**: `ConversationSeed`, `AggregateConsumer`

pub mod aggregate;
pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod error;
pub mod error_recovery;
pub mod formatting;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod types;
pub mod walker;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::error_recovery::{retry_with_backoff, RetryPolicy};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, OutputFormat, PipelineConfig};

// --- Domain Model ---
pub use crate::model::blocks::{
    ChildDatabaseBlock, ChildPageBlock, CodeBlock, ExternalFile, FileObject, LinkBlock,
    MediaBlock, NotionFile, PlainBlock, TableBlock, TableRowBlock, TextBlock, TextBlockContent,
    ToDoBlock, UnsupportedBlock,
};
pub use crate::model::{Block, BlockCommon, PageMetadata, PageTag, PropertyValue};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BlockId, EquationData, Link, MentionData, MentionType, NotionId, PageId,
    PropertyName, RichTextItem, RichTextType,
};

// --- API Client ---
pub use crate::api::{
    fetch_all_pages_simple,
    parser::{parse_block_value, parse_blocks_pagination, parse_page_metadata},
    ApiResponse, NotionHttpClient, NotionRepository, PaginatedResponse,
};

// --- Walk ---
pub use crate::aggregate::{merge_page, Aggregate};
pub use crate::walker::{mention_target, MentionPolicy, TraversalState, TreeWalker, WalkOptions};

// --- Formatting ---
pub use crate::formatting::{
    compose_aggregate_markdown, format_table_rows, plain_text_of, render_aggregate, render_block,
    render_rich_text, ListCounters,
};

// --- Conversation ---
pub use crate::analytics::{measure_aggregate, AggregateSummary};
pub use crate::conversation::{
    AggregateConsumer, ChatMessage, ChatRole, ConversationSeed, SeedBuilder,
};

// --- Pipeline Traits ---
pub use crate::pipeline::{AggregateComposer, AggregateSource, Delivery};
