//! View Statistics Module
//!
//! Tracks view store reads and populations.

use serde::Serialize;

// == View Stats ==
/// Counters for the view store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewStats {
    /// Reads served from a populated slot
    pub hits: u64,
    /// Reads that found the slot absent and triggered population
    pub misses: u64,
    /// Successful populations
    pub populations: u64,
    /// Populations that failed and left the slot untouched
    pub failed_populations: u64,
    /// Slots currently holding contents
    pub populated_views: usize,
}

impl ViewStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_population(&mut self) {
        self.populations += 1;
    }

    pub fn record_failed_population(&mut self) {
        self.failed_populations += 1;
    }

    pub fn set_populated_views(&mut self, count: usize) {
        self.populated_views = count;
    }
}
