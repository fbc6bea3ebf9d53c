//! Shared output types for per-item operations.
//!
//! Used by the rename pass, where each file moves independently and a failed
//! move must not hide the outcome of the others.

use serde::Serialize;

/// Standardized bulk execution result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResult<T: Serialize> {
    pub action: String,
    pub results: Vec<ItemOutcome<T>>,
    pub summary: BulkSummary,
}

/// Outcome for a single item in a bulk operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome<T: Serialize> {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(flatten)]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of bulk operation results.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl<T: Serialize> BulkResult<T> {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            results: Vec::new(),
            summary: BulkSummary::default(),
        }
    }

    pub fn record_success(&mut self, id: String, result: T) {
        self.summary.total += 1;
        self.summary.succeeded += 1;
        self.results.push(ItemOutcome {
            id,
            result: Some(result),
            error: None,
        });
    }

    pub fn record_failure(&mut self, id: String, error: String) {
        self.summary.total += 1;
        self.summary.failed += 1;
        self.results.push(ItemOutcome {
            id,
            result: None,
            error: Some(error),
        });
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}
