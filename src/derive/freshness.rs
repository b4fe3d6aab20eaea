//! Freshness Deriver
//!
//! Recomputes every product's `stockout` flag from the price history of a
//! single calendar day.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::info;

use crate::catalog::CatalogRepository;
use crate::derive::BatchReport;
use crate::error::{CatalogError, Result};

/// Sets `stockout = false` on products with a price observation on `as_of`
/// and `stockout = true` on every other product.
///
/// Every product is written exactly once. A failed write is recorded in the
/// report and the run moves on; re-running for the same day converges to the
/// same state. Price entries for unknown products are reported as join
/// mismatches.
pub async fn derive_freshness(
    repo: &dyn CatalogRepository,
    as_of: NaiveDate,
) -> Result<BatchReport> {
    let observed: HashSet<String> = repo
        .price_entries_on(as_of)
        .await?
        .into_iter()
        .map(|entry| entry.product_id)
        .collect();
    let products = repo.all_products().await?;

    let mut report = BatchReport::new();
    let mut in_stock = 0usize;
    for product in &products {
        let stockout = !observed.contains(&product.id);
        if !stockout {
            in_stock += 1;
        }
        report.record(&product.id, repo.set_stockout(&product.id, stockout).await);
    }

    let known: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
    let mut orphans: Vec<&String> = observed
        .iter()
        .filter(|id| !known.contains(id.as_str()))
        .collect();
    orphans.sort();
    for id in orphans {
        report.record_skipped(id, &CatalogError::JoinMismatch(id.clone()));
    }

    info!(
        %as_of,
        products = products.len(),
        in_stock,
        skipped = report.skipped.len(),
        "Freshness derived"
    );
    Ok(report)
}
