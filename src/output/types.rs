// src/output/types.rs
//! Planning and reporting types for output delivery.

use std::path::PathBuf;

/// The deliveries to perform, in order.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Where one copy of the rendered output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    WriteFile { path: PathBuf, content: String },
    CopyToClipboard { content: String },
    PrintToStdout { content: String },
}

impl DeliveryTarget {
    /// Short human-readable name used in reports.
    pub fn describe(&self) -> String {
        match self {
            DeliveryTarget::WriteFile { path, .. } => format!("file {}", path.display()),
            DeliveryTarget::CopyToClipboard { .. } => "clipboard".to_string(),
            DeliveryTarget::PrintToStdout { .. } => "stdout".to_string(),
        }
    }
}

/// Result of executing an output plan.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub completed: Vec<CompletedOperation>,
    pub failed: Vec<FailedOperation>,
    pub stats: ExecutionStats,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(mut self, operation: CompletedOperation) -> Self {
        self.stats.operations_completed += 1;
        self.stats.bytes_written += operation.bytes_written;
        self.completed.push(operation);
        self
    }

    pub fn with_failed(mut self, operation: FailedOperation) -> Self {
        self.stats.operations_failed += 1;
        self.failed.push(operation);
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// One line per failed delivery: target and error.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|f| format!("{}: {}", f.operation.describe(), f.error))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct CompletedOperation {
    pub operation: DeliveryTarget,
    pub bytes_written: usize,
}

#[derive(Debug, Clone)]
pub struct FailedOperation {
    pub operation: DeliveryTarget,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub operations_completed: usize,
    pub operations_failed: usize,
    pub bytes_written: usize,
    pub total_duration_ms: u64,
}
