//! Turns blocks, tables and finished aggregates into text.

pub mod block_text;
pub mod document;
pub mod rich_text;
pub mod state;
pub mod table;

pub use block_text::render_block;
pub use document::{compose_aggregate_markdown, render_aggregate};
pub use rich_text::{plain_text_of, render_rich_text};
pub use state::ListCounters;
pub use table::format_table_rows;
