//! Catalog Repository
//!
//! The persistence seam. Everything the core needs from the relational store
//! and the history logs is expressed as a simple predicate query here.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Result;
use crate::models::{PriceHistoryEntry, Product, PromotionHistoryEntry};

/// Access to product rows and the append-only history logs.
///
/// Writers must not assume exclusive access: derivations, ingestion and view
/// population may all run against the same repository concurrently.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every product row.
    async fn all_products(&self) -> Result<Vec<Product>>;

    async fn find_product(&self, id: &str) -> Result<Option<Product>>;

    /// Products for the given ids, in the order requested. Unknown ids are skipped.
    async fn products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>>;

    /// Inserts or replaces a product row.
    async fn upsert_product(&self, product: Product) -> Result<()>;

    async fn set_stockout(&self, id: &str, stockout: bool) -> Result<()>;

    async fn set_multi_buy(&self, id: &str, label: Option<String>) -> Result<()>;

    async fn set_price_range(&self, id: &str, min_price: u64, max_price: u64) -> Result<()>;

    async fn append_price(&self, entry: PriceHistoryEntry) -> Result<()>;

    /// Appends a promotion observation and returns it with its assigned sequence number.
    async fn append_promotion(
        &self,
        product_id: &str,
        label: &str,
        observed_at: DateTime<Utc>,
    ) -> Result<PromotionHistoryEntry>;

    /// Price observations whose `observed_at` falls on `day`.
    async fn price_entries_on(&self, day: NaiveDate) -> Result<Vec<PriceHistoryEntry>>;

    /// Promotion observations whose `observed_at` falls on `day`, in sequence order.
    async fn promotion_entries_on(&self, day: NaiveDate) -> Result<Vec<PromotionHistoryEntry>>;

    /// Most recent price observation per product id.
    async fn last_price_observations(&self) -> Result<HashMap<String, DateTime<Utc>>>;
}
