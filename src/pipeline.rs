// src/pipeline.rs
//! Capability traits for the three stages of a run: walk, render, deliver.

use crate::aggregate::Aggregate;
use crate::error::AppError;
use crate::output::OutputReport;
use crate::types::NotionId;

/// Produces the aggregate for a root page.
#[async_trait::async_trait]
pub trait AggregateSource {
    async fn fetch(&self, root: &NotionId) -> Result<Aggregate, AppError>;
}

/// Renders an aggregate into deliverable text.
pub trait AggregateComposer {
    fn compose(&self, aggregate: &Aggregate) -> Result<String, AppError>;
}

/// Sends rendered text to its destinations.
pub trait Delivery {
    fn deliver(&self, rendered: String) -> Result<OutputReport, AppError>;
}
