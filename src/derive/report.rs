//! Batch Report Module
//!
//! Per-item outcome summary returned by batch operations. A failure on one
//! product is recorded here and never stops the batch.

use serde::Serialize;
use tracing::warn;

use crate::error::CatalogError;

// == Skipped Item ==
/// A product the batch could not process, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedItem {
    pub product_id: String,
    pub reason: String,
}

// == Batch Report ==
/// Outcome counters for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// Items examined
    pub processed: usize,
    /// Items whose write succeeded
    pub updated: usize,
    /// Items skipped because of a persistence failure or a join mismatch
    pub skipped: Vec<SkippedItem>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Updated ==
    pub fn record_updated(&mut self) {
        self.processed += 1;
        self.updated += 1;
    }

    // == Record Skipped ==
    /// Records a skipped item and logs it.
    pub fn record_skipped(&mut self, product_id: &str, err: &CatalogError) {
        warn!(product_id, error = %err, "Skipping product");
        self.processed += 1;
        self.skipped.push(SkippedItem {
            product_id: product_id.to_string(),
            reason: err.to_string(),
        });
    }

    /// Records the outcome of a single item write.
    pub fn record(&mut self, product_id: &str, outcome: crate::error::Result<()>) {
        match outcome {
            Ok(()) => self.record_updated(),
            Err(err) => self.record_skipped(product_id, &err),
        }
    }

    /// True when no item was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
