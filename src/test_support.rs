//! Shared fixtures for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::catalog::{CatalogRepository, InMemoryCatalog};
use crate::error::{CatalogError, Result};
use crate::models::{PriceHistoryEntry, Product, PromotionHistoryEntry};

/// A day in March 2024.
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

/// An instant on a day in March 2024.
pub fn at(d: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, d, hour, 0, 0).unwrap()
}

/// Inserts plain products named after their ids.
pub async fn seed(repo: &dyn CatalogRepository, ids: &[&str]) {
    for id in ids {
        repo.upsert_product(Product::new(*id, *id, 100)).await.unwrap();
    }
}

pub async fn observe_price(repo: &dyn CatalogRepository, id: &str, on: NaiveDate) {
    repo.append_price(PriceHistoryEntry {
        product_id: id.to_string(),
        price: 100,
        observed_at: on.and_hms_opt(6, 0, 0).unwrap().and_utc(),
    })
    .await
    .unwrap();
}

// == Flaky Catalog ==
/// Wraps an in-memory catalog, failing writes for chosen ids and optionally
/// failing whole-table reads.
pub struct FlakyCatalog {
    inner: InMemoryCatalog,
    failing_ids: HashSet<String>,
    fail_reads: AtomicBool,
}

impl FlakyCatalog {
    pub fn new(inner: InMemoryCatalog, failing_ids: &[&str]) -> Self {
        Self {
            inner,
            failing_ids: failing_ids.iter().map(|id| id.to_string()).collect(),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn set_read_failure(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_write(&self, id: &str) -> Result<()> {
        if self.failing_ids.contains(id) {
            return Err(CatalogError::Persistence(format!("write rejected for {}", id)));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CatalogError::Persistence("connection lost".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for FlakyCatalog {
    async fn all_products(&self) -> Result<Vec<Product>> {
        self.check_read()?;
        self.inner.all_products().await
    }

    async fn find_product(&self, id: &str) -> Result<Option<Product>> {
        self.inner.find_product(id).await
    }

    async fn products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>> {
        self.check_read()?;
        self.inner.products_by_ids(ids).await
    }

    async fn upsert_product(&self, product: Product) -> Result<()> {
        self.check_write(&product.id)?;
        self.inner.upsert_product(product).await
    }

    async fn set_stockout(&self, id: &str, stockout: bool) -> Result<()> {
        self.check_write(id)?;
        self.inner.set_stockout(id, stockout).await
    }

    async fn set_multi_buy(&self, id: &str, label: Option<String>) -> Result<()> {
        self.check_write(id)?;
        self.inner.set_multi_buy(id, label).await
    }

    async fn set_price_range(&self, id: &str, min_price: u64, max_price: u64) -> Result<()> {
        self.check_write(id)?;
        self.inner.set_price_range(id, min_price, max_price).await
    }

    async fn append_price(&self, entry: PriceHistoryEntry) -> Result<()> {
        self.inner.append_price(entry).await
    }

    async fn append_promotion(
        &self,
        product_id: &str,
        label: &str,
        observed_at: DateTime<Utc>,
    ) -> Result<PromotionHistoryEntry> {
        self.inner.append_promotion(product_id, label, observed_at).await
    }

    async fn price_entries_on(&self, on: NaiveDate) -> Result<Vec<PriceHistoryEntry>> {
        self.inner.price_entries_on(on).await
    }

    async fn promotion_entries_on(&self, on: NaiveDate) -> Result<Vec<PromotionHistoryEntry>> {
        self.inner.promotion_entries_on(on).await
    }

    async fn last_price_observations(&self) -> Result<HashMap<String, DateTime<Utc>>> {
        self.check_read()?;
        self.inner.last_price_observations().await
    }
}
