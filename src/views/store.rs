//! View Store Module
//!
//! Holds the five cache slots. A slot is absent until first read or explicit
//! population and then kept indefinitely: no TTL, no invalidation on product
//! writes.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::catalog::CatalogRepository;
use crate::clock::Clock;
use crate::error::{CatalogError, Result};
use crate::models::ProductSummary;
use crate::views::{build_view, ViewName, ViewStats};

/// Immutable contents of a populated slot.
pub type ViewContents = Arc<Vec<ProductSummary>>;

#[derive(Debug, Default)]
struct ViewSlots {
    entries: HashMap<ViewName, ViewContents>,
    stats: ViewStats,
}

// == View Store ==
/// Lazily populated, explicitly refreshed cache of product views.
///
/// Population runs without holding the slot lock and finishes with a single
/// swap, so readers see either the previous or the new contents in full.
/// Concurrent populations of the same view are allowed; the last to finish
/// wins.
pub struct ViewStore {
    repo: Arc<dyn CatalogRepository>,
    clock: Arc<dyn Clock>,
    window_days: i64,
    slots: RwLock<ViewSlots>,
}

impl ViewStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `repo` - Catalog the views are computed from
    /// * `clock` - Decides what "today" is for the stockout view
    /// * `window_days` - Length of the stockout decay window
    pub fn new(repo: Arc<dyn CatalogRepository>, clock: Arc<dyn Clock>, window_days: i64) -> Self {
        Self {
            repo,
            clock,
            window_days,
            slots: RwLock::new(ViewSlots::default()),
        }
    }

    // == Get ==
    /// Returns the slot contents, populating the slot first if it is absent.
    ///
    /// Population failures on an absent slot are returned to the caller.
    pub async fn get(&self, view: ViewName) -> Result<ViewContents> {
        {
            let mut slots = self.slots.write().await;
            if let Some(contents) = slots.entries.get(&view).cloned() {
                slots.stats.record_hit();
                debug!(%view, "View cache hit");
                return Ok(contents);
            }
            slots.stats.record_miss();
        }

        debug!(%view, "View cache miss");
        self.populate(view).await
    }

    // == Populate ==
    /// Recomputes the view as of the clock's current day and replaces the slot.
    pub async fn populate(&self, view: ViewName) -> Result<ViewContents> {
        self.populate_as_of(view, self.clock.today()).await
    }

    /// Recomputes the view as of `as_of` and replaces the slot.
    ///
    /// Only the stockout view depends on the day. On failure the slot keeps
    /// whatever it held before.
    pub async fn populate_as_of(&self, view: ViewName, as_of: NaiveDate) -> Result<ViewContents> {
        let built = build_view(self.repo.as_ref(), view, as_of, self.window_days).await;

        let mut slots = self.slots.write().await;
        match built {
            Ok(products) => {
                let contents: ViewContents = Arc::new(products);
                slots.entries.insert(view, contents.clone());
                slots.stats.record_population();
                info!(
                    %view,
                    %as_of,
                    key = %view.cache_key(),
                    count = contents.len(),
                    "View populated"
                );
                Ok(contents)
            }
            Err(err) => {
                slots.stats.record_failed_population();
                warn!(%view, error = %err, "View population failed");
                Err(err)
            }
        }
    }

    // == Invalidate ==
    /// Drops the slot so the next read repopulates it. Returns whether it was populated.
    pub async fn invalidate(&self, view: ViewName) -> bool {
        let removed = self.slots.write().await.entries.remove(&view).is_some();
        if removed {
            info!(%view, "View invalidated");
        }
        removed
    }

    // == Refresh All ==
    /// Repopulates every view as of `as_of`. Views that fail keep their
    /// previous contents; their errors are returned.
    pub async fn refresh_all(&self, as_of: NaiveDate) -> Vec<(ViewName, CatalogError)> {
        let mut failures = Vec::new();
        for view in ViewName::ALL {
            if let Err(err) = self.populate_as_of(view, as_of).await {
                failures.push((view, err));
            }
        }
        failures
    }

    /// The decayed-availability list: products seen recently but not today.
    pub async fn stockout_snapshot(&self) -> Result<ViewContents> {
        self.get(ViewName::Stockout).await
    }

    pub async fn is_populated(&self, view: ViewName) -> bool {
        self.slots.read().await.entries.contains_key(&view)
    }

    // == Stats ==
    pub async fn stats(&self) -> ViewStats {
        let slots = self.slots.read().await;
        let mut stats = slots.stats.clone();
        stats.set_populated_views(slots.entries.len());
        stats
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::clock::FixedClock;
    use crate::models::Product;
    use crate::test_support::{day, observe_price, FlakyCatalog};

    fn sale_product(id: &str, price: u64) -> Product {
        let mut product = Product::new(id, id, price);
        product.sale = true;
        product.max_price = Some(1000);
        product
    }

    fn store_over(repo: Arc<dyn CatalogRepository>) -> ViewStore {
        ViewStore::new(repo, Arc::new(FixedClock::on(day(9))), 7)
    }

    #[tokio::test]
    async fn test_get_populates_absent_slot() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.upsert_product(sale_product("a", 100)).await.unwrap();
        let store = store_over(catalog);

        assert!(!store.is_populated(ViewName::Sale).await);
        let contents = store.get(ViewName::Sale).await.unwrap();
        assert_eq!(contents.len(), 1);
        assert!(store.is_populated(ViewName::Sale).await);

        let stats = store.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.populations, 1);
        assert_eq!(stats.populated_views, 1);
    }

    #[tokio::test]
    async fn test_populated_slot_is_not_refreshed_by_writes() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.upsert_product(sale_product("a", 100)).await.unwrap();
        let store = store_over(catalog.clone());

        store.get(ViewName::Sale).await.unwrap();
        catalog.upsert_product(sale_product("b", 50)).await.unwrap();

        let stale = store.get(ViewName::Sale).await.unwrap();
        assert_eq!(stale.len(), 1);
        assert_eq!(store.stats().await.hits, 1);

        let fresh = store.populate(ViewName::Sale).await.unwrap();
        assert_eq!(fresh.len(), 2);
        assert_eq!(fresh[0].id, "b");
    }

    #[tokio::test]
    async fn test_invalidate_forces_repopulation() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let store = store_over(catalog.clone());

        assert!(store.get(ViewName::Sale).await.unwrap().is_empty());
        catalog.upsert_product(sale_product("a", 100)).await.unwrap();

        assert!(store.invalidate(ViewName::Sale).await);
        assert!(!store.invalidate(ViewName::Sale).await);
        assert_eq!(store.get(ViewName::Sale).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_population_keeps_previous_contents() {
        let inner = InMemoryCatalog::new();
        inner.upsert_product(sale_product("a", 100)).await.unwrap();
        let catalog = Arc::new(FlakyCatalog::new(inner, &[]));
        let store = store_over(catalog.clone());

        let before = store.get(ViewName::Sale).await.unwrap();
        catalog.set_read_failure(true);

        assert!(matches!(
            store.populate(ViewName::Sale).await,
            Err(CatalogError::Persistence(_))
        ));
        let after = store.get(ViewName::Sale).await.unwrap();
        assert_eq!(before, after);
        assert_eq!(store.stats().await.failed_populations, 1);
    }

    #[tokio::test]
    async fn test_failed_population_of_absent_slot_surfaces_error() {
        let catalog = Arc::new(FlakyCatalog::new(InMemoryCatalog::new(), &[]));
        catalog.set_read_failure(true);
        let store = store_over(catalog.clone());

        assert!(store.get(ViewName::New).await.is_err());
        assert!(!store.is_populated(ViewName::New).await);
    }

    #[tokio::test]
    async fn test_refresh_all_reports_failures() {
        let catalog = Arc::new(FlakyCatalog::new(InMemoryCatalog::new(), &[]));
        let store = store_over(catalog.clone());

        assert!(store.refresh_all(day(9)).await.is_empty());
        assert_eq!(store.stats().await.populated_views, 5);

        catalog.set_read_failure(true);
        let failures = store.refresh_all(day(9)).await;
        assert_eq!(failures.len(), 5);
        assert_eq!(store.stats().await.populated_views, 5);
    }

    #[tokio::test]
    async fn test_populate_as_of_decides_stockout_window() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.upsert_product(Product::new("x", "x", 100)).await.unwrap();
        observe_price(catalog.as_ref(), "x", day(8)).await;
        let store = store_over(catalog);

        // The clock says the 9th, so x was last seen yesterday
        assert_eq!(store.populate(ViewName::Stockout).await.unwrap().len(), 1);

        let later = store.populate_as_of(ViewName::Stockout, day(20)).await.unwrap();
        assert!(later.is_empty());
        assert!(store.stockout_snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_reads_see_whole_contents() {
        let catalog = Arc::new(InMemoryCatalog::new());
        for i in 0..20 {
            catalog
                .upsert_product(sale_product(&format!("p{:02}", i), 100 + i))
                .await
                .unwrap();
        }
        let store = Arc::new(store_over(catalog));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    store.populate(ViewName::Sale).await.unwrap().len()
                } else {
                    store.get(ViewName::Sale).await.unwrap().len()
                }
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), 20);
        }
    }
}
