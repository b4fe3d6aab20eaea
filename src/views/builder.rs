//! View Builder
//!
//! Computes the full ordered contents of a view from current product rows.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::warn;

use crate::catalog::CatalogRepository;
use crate::error::{CatalogError, Result};
use crate::models::{Product, ProductSummary};
use crate::views::ordering::{limited_offer_order, multi_buy_order, new_order, sale_order};
use crate::views::ViewName;

type Filter = fn(&Product) -> bool;
type Comparator = fn(&Product, &Product) -> Ordering;

/// Filter and sort rules for the views computed straight from product rows.
/// The stockout view is driven by price history instead and has no rule here.
fn rules(view: ViewName) -> Option<(Filter, Comparator)> {
    match view {
        ViewName::LimitedOffer => Some((Product::has_limited_offer, limited_offer_order)),
        ViewName::MultiBuy => Some((has_multi_buy, multi_buy_order)),
        ViewName::Sale => Some((is_sale, sale_order)),
        ViewName::New => Some((is_new, new_order)),
        ViewName::Stockout => None,
    }
}

fn has_multi_buy(product: &Product) -> bool {
    product.multi_buy.is_some()
}

fn is_sale(product: &Product) -> bool {
    product.sale
}

fn is_new(product: &Product) -> bool {
    product.new
}

/// Builds the ordered projection for `view` as of `today`.
///
/// Zero qualifying products is not an error and yields an empty list.
pub async fn build_view(
    repo: &dyn CatalogRepository,
    view: ViewName,
    today: NaiveDate,
    window_days: i64,
) -> Result<Vec<ProductSummary>> {
    let Some((admits, order)) = rules(view) else {
        return build_stockout_view(repo, today, window_days).await;
    };

    let mut products: Vec<Product> = repo
        .all_products()
        .await?
        .into_iter()
        .filter(|p| !p.stockout && admits(p))
        .collect();
    products.sort_by(order);

    Ok(products.iter().map(Product::summary).collect())
}

/// Ids whose last observation falls in `[today - window_days, today)`,
/// most recently observed first.
///
/// A window that cannot be represented as a date range is rejected.
pub fn decay_window_ids(
    last_observed: &HashMap<String, DateTime<Utc>>,
    today: NaiveDate,
    window_days: i64,
) -> Result<Vec<String>> {
    let end = start_of(today);
    let start = Duration::try_days(window_days)
        .and_then(|window| end.checked_sub_signed(window))
        .ok_or_else(|| {
            CatalogError::InvalidRequest(format!(
                "stockout window of {} days is out of range",
                window_days
            ))
        })?;

    let mut recent: Vec<(&String, &DateTime<Utc>)> = last_observed
        .iter()
        .filter(|(_, seen)| **seen >= start && **seen < end)
        .collect();
    recent.sort_by(|(a_id, a_seen), (b_id, b_seen)| {
        b_seen.cmp(a_seen).then_with(|| a_id.cmp(b_id))
    });

    Ok(recent.into_iter().map(|(id, _)| id.clone()).collect())
}

fn start_of(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
}

async fn build_stockout_view(
    repo: &dyn CatalogRepository,
    today: NaiveDate,
    window_days: i64,
) -> Result<Vec<ProductSummary>> {
    let last_observed = repo.last_price_observations().await?;
    let ids = decay_window_ids(&last_observed, today, window_days)?;
    let products = repo.products_by_ids(&ids).await?;

    if products.len() < ids.len() {
        let found: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
        for id in ids.iter().filter(|id| !found.contains(id.as_str())) {
            let err = CatalogError::JoinMismatch(id.clone());
            warn!(view = %ViewName::Stockout, error = %err, "Dropping history-only id");
        }
    }

    Ok(products.iter().map(Product::summary).collect())
}
