//! Promotion Merger
//!
//! Applies the latest promotion label observed on a given day to each product
//! and clears labels that were not observed that day.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use tracing::info;

use crate::catalog::CatalogRepository;
use crate::derive::BatchReport;
use crate::error::{CatalogError, Result};
use crate::models::PromotionHistoryEntry;

/// Picks, per product, the entry with the highest sequence number.
pub fn latest_labels(entries: &[PromotionHistoryEntry]) -> BTreeMap<&str, &PromotionHistoryEntry> {
    let mut latest: BTreeMap<&str, &PromotionHistoryEntry> = BTreeMap::new();
    for entry in entries {
        latest
            .entry(entry.product_id.as_str())
            .and_modify(|current| {
                if entry.seq > current.seq {
                    *current = entry;
                }
            })
            .or_insert(entry);
    }
    latest
}

/// Merges `as_of`'s promotion history onto product rows.
///
/// Runs in two whole-set steps: first every labelled product without an
/// observation on `as_of` is cleared, then every product with observations
/// receives the label of its highest-sequence entry. Both steps are
/// recomputed from the log on every run, so a crash between them is repaired
/// by the next run.
pub async fn merge_promotions(
    repo: &dyn CatalogRepository,
    as_of: NaiveDate,
) -> Result<BatchReport> {
    let entries = repo.promotion_entries_on(as_of).await?;
    let latest = latest_labels(&entries);
    let products = repo.all_products().await?;

    let mut report = BatchReport::new();

    // Step 1: clear stale labels
    let mut cleared = 0usize;
    for product in products
        .iter()
        .filter(|p| p.multi_buy.is_some() && !latest.contains_key(p.id.as_str()))
    {
        cleared += 1;
        report.record(&product.id, repo.set_multi_buy(&product.id, None).await);
    }

    // Step 2: apply latest labels
    let known: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
    for (product_id, entry) in &latest {
        if !known.contains(product_id) {
            report.record_skipped(product_id, &CatalogError::JoinMismatch(product_id.to_string()));
            continue;
        }
        let outcome = repo
            .set_multi_buy(product_id, Some(entry.promotion_label.clone()))
            .await;
        report.record(product_id, outcome);
    }

    info!(
        %as_of,
        entries = entries.len(),
        cleared,
        applied = latest.len(),
        skipped = report.skipped.len(),
        "Promotions merged"
    );
    Ok(report)
}
