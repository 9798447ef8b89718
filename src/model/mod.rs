mod block;
pub mod blocks;
pub mod common;
mod page;
mod page_tag;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use page::{PageMetadata, PropertyValue};
pub use page_tag::PageTag;
