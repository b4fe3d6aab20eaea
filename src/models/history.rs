//! History Log entries
//!
//! Immutable facts appended once per ingestion run. Never updated or deleted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A price observed for a product during an ingestion run.
///
/// Only the existence of an entry on a given day matters to freshness; the
/// price itself is kept for reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryEntry {
    pub product_id: String,
    pub price: u64,
    pub observed_at: DateTime<Utc>,
}

impl PriceHistoryEntry {
    pub fn observed_on(&self, day: NaiveDate) -> bool {
        self.observed_at.date_naive() == day
    }
}

/// A promotion label observed for a product during an ingestion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionHistoryEntry {
    /// Monotonically increasing append sequence; later entries win
    pub seq: u64,
    pub product_id: String,
    pub promotion_label: String,
    pub observed_at: DateTime<Utc>,
}

impl PromotionHistoryEntry {
    pub fn observed_on(&self, day: NaiveDate) -> bool {
        self.observed_at.date_naive() == day
    }
}
