//! In-Memory Catalog
//!
//! `CatalogRepository` backed by maps and vectors behind a tokio `RwLock`.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::catalog::CatalogRepository;
use crate::error::{CatalogError, Result};
use crate::models::{PriceHistoryEntry, Product, PromotionHistoryEntry};

#[derive(Debug, Default)]
struct CatalogState {
    products: BTreeMap<String, Product>,
    price_log: Vec<PriceHistoryEntry>,
    promotion_log: Vec<PromotionHistoryEntry>,
    next_seq: u64,
}

impl CatalogState {
    fn product_mut(&mut self, id: &str) -> Result<&mut Product> {
        self.products
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

// == In-Memory Catalog ==
/// Product table plus price and promotion history logs held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn all_products(&self) -> Result<Vec<Product>> {
        Ok(self.state.read().await.products.values().cloned().collect())
    }

    async fn find_product(&self, id: &str) -> Result<Option<Product>> {
        Ok(self.state.read().await.products.get(id).cloned())
    }

    async fn products_by_ids(&self, ids: &[String]) -> Result<Vec<Product>> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.products.get(id).cloned())
            .collect())
    }

    async fn upsert_product(&self, product: Product) -> Result<()> {
        let mut state = self.state.write().await;
        state.products.insert(product.id.clone(), product);
        Ok(())
    }

    async fn set_stockout(&self, id: &str, stockout: bool) -> Result<()> {
        let mut state = self.state.write().await;
        let product = state.product_mut(id)?;
        if product.stockout != stockout {
            product.stockout = stockout;
            product.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_multi_buy(&self, id: &str, label: Option<String>) -> Result<()> {
        let mut state = self.state.write().await;
        let product = state.product_mut(id)?;
        if product.multi_buy != label {
            product.multi_buy = label;
            product.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_price_range(&self, id: &str, min_price: u64, max_price: u64) -> Result<()> {
        let mut state = self.state.write().await;
        let product = state.product_mut(id)?;
        product.min_price = Some(min_price);
        product.max_price = Some(max_price);
        product.updated_at = Utc::now();
        Ok(())
    }

    async fn append_price(&self, entry: PriceHistoryEntry) -> Result<()> {
        self.state.write().await.price_log.push(entry);
        Ok(())
    }

    async fn append_promotion(
        &self,
        product_id: &str,
        label: &str,
        observed_at: DateTime<Utc>,
    ) -> Result<PromotionHistoryEntry> {
        let mut state = self.state.write().await;
        state.next_seq += 1;
        let entry = PromotionHistoryEntry {
            seq: state.next_seq,
            product_id: product_id.to_string(),
            promotion_label: label.to_string(),
            observed_at,
        };
        state.promotion_log.push(entry.clone());
        Ok(entry)
    }

    async fn price_entries_on(&self, day: NaiveDate) -> Result<Vec<PriceHistoryEntry>> {
        let state = self.state.read().await;
        Ok(state
            .price_log
            .iter()
            .filter(|entry| entry.observed_on(day))
            .cloned()
            .collect())
    }

    async fn promotion_entries_on(&self, day: NaiveDate) -> Result<Vec<PromotionHistoryEntry>> {
        let state = self.state.read().await;
        Ok(state
            .promotion_log
            .iter()
            .filter(|entry| entry.observed_on(day))
            .cloned()
            .collect())
    }

    async fn last_price_observations(&self) -> Result<HashMap<String, DateTime<Utc>>> {
        let state = self.state.read().await;
        let mut latest: HashMap<String, DateTime<Utc>> = HashMap::new();
        for entry in &state.price_log {
            latest
                .entry(entry.product_id.clone())
                .and_modify(|seen| *seen = (*seen).max(entry.observed_at))
                .or_insert(entry.observed_at);
        }
        Ok(latest)
    }
}
