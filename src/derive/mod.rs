//! Derivation Module
//!
//! Batch jobs run once per ingestion cycle that rewrite derived product
//! columns from the history logs.
//!
//! # Jobs
//! - Freshness: `stockout` flag from today's price observations
//! - Promotions: `multi_buy` label from today's promotion observations

mod freshness;
mod promotions;
mod report;

pub use freshness::derive_freshness;
pub use promotions::{latest_labels, merge_promotions};
pub use report::{BatchReport, SkippedItem};
