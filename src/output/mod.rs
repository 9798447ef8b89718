// src/output/mod.rs
//! Output delivery: plans are built first, then executed in one place.

mod clipboard;
mod types;
mod writer;

pub use clipboard::copy_to_clipboard;
pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use writer::deliver;
