//! Catalog Cache - read-optimized views over a crawled product catalog
//!
//! Derives per-product freshness and promotion state from the ingestion
//! history logs and serves lazily populated, deterministically ordered
//! product lists.

pub mod api;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod derive;
pub mod error;
pub mod ingest;
pub mod models;
pub mod related;
pub mod tasks;
pub mod views;

#[cfg(test)]
mod test_support;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_derivation_task;
