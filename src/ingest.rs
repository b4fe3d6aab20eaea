//! Ingestion Boundary
//!
//! Maps validated crawler records into product upserts and history appends.
//! Each record is handled on its own; a bad or failing record is reported and
//! the rest of the batch proceeds.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::catalog::CatalogRepository;
use crate::clock::Clock;
use crate::derive::BatchReport;
use crate::error::{CatalogError, Result};
use crate::models::{
    ExternalProductRecord, ExternalPromotionRecord, PriceHistoryEntry, PriceRangeRecord, Product,
};

/// Representative-SKU flag marking a sale item.
pub const SALE_FLAG: &str = "SALE";
/// Representative-SKU flag marking a product that carries a multi-buy promotion.
pub const MULTI_BUY_FLAG: &str = "MULTI_BUY";

/// Builds the main image URL for a product in the given color.
pub fn main_image_url(base_url: &str, id: &str, color: &str) -> String {
    format!("{}/{}/item/{}_{}.jpg", base_url.trim_end_matches('/'), id, color, id)
}

/// Maps a crawler record onto a product row.
///
/// Columns owned by other processes (`stockout`, `multi_buy`, the price range
/// and `created_at`) are carried over from `existing` when there is one.
pub fn map_record(
    record: &ExternalProductRecord,
    existing: Option<Product>,
    image_base_url: &str,
    now: DateTime<Utc>,
) -> Product {
    let sku = &record.representative_sku;
    let flags = record.flag_names();
    let mut product = existing.unwrap_or_else(|| {
        let mut fresh = Product::new(record.id.clone(), record.name.clone(), sku.sale_price);
        fresh.created_at = now;
        fresh
    });

    product.name = record.name.clone();
    product.category_id = record.parent_category_id.clone();
    product.main_image_url = main_image_url(image_base_url, &record.id, &sku.color);
    product.comment = record.catch_copy.clone();
    product.price = sku.sale_price;
    product.limit_sales_end_msg = sku.limit_sales_end_msg.clone().unwrap_or_default();
    product.new = record.new;
    product.sale = flags.iter().any(|f| f == SALE_FLAG);
    product.sku_flags = flags;
    product.review_count = record.review_count;
    product.updated_at = now;
    product
}

// == Ingestor ==
/// Writes crawler output into the catalog.
pub struct Ingestor {
    repo: Arc<dyn CatalogRepository>,
    clock: Arc<dyn Clock>,
    image_base_url: String,
}

impl Ingestor {
    pub fn new(
        repo: Arc<dyn CatalogRepository>,
        clock: Arc<dyn Clock>,
        image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            clock,
            image_base_url: image_base_url.into(),
        }
    }

    // == Products ==
    /// Upserts each product and appends exactly one price observation for it.
    pub async fn ingest_products(&self, records: &[ExternalProductRecord]) -> BatchReport {
        let now = self.clock.now();
        let mut report = BatchReport::new();
        for record in records {
            let outcome = self.ingest_product(record, now).await;
            report.record(&record.id, outcome);
        }
        info!(records = records.len(), skipped = report.skipped.len(), "Products ingested");
        report
    }

    async fn ingest_product(
        &self,
        record: &ExternalProductRecord,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if let Some(msg) = record.validate() {
            return Err(CatalogError::InvalidRequest(msg));
        }
        let existing = self.repo.find_product(&record.id).await?;
        let product = map_record(record, existing, &self.image_base_url, now);
        let price = product.price;
        self.repo.upsert_product(product).await?;
        self.repo
            .append_price(PriceHistoryEntry {
                product_id: record.id.clone(),
                price,
                observed_at: now,
            })
            .await
    }

    // == Promotions ==
    /// Appends one promotion observation per record.
    pub async fn ingest_promotions(&self, records: &[ExternalPromotionRecord]) -> BatchReport {
        let now = self.clock.now();
        let mut report = BatchReport::new();
        for record in records {
            let outcome = self.ingest_promotion(record, now).await;
            report.record(&record.product_id, outcome);
        }
        info!(records = records.len(), skipped = report.skipped.len(), "Promotions ingested");
        report
    }

    async fn ingest_promotion(
        &self,
        record: &ExternalPromotionRecord,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if let Some(msg) = record.validate() {
            return Err(CatalogError::InvalidRequest(msg));
        }
        if self.repo.find_product(&record.product_id).await?.is_none() {
            return Err(CatalogError::JoinMismatch(record.product_id.clone()));
        }
        self.repo
            .append_promotion(&record.product_id, record.label.trim(), now)
            .await
            .map(|_| ())
    }

    // == Price Ranges ==
    /// Applies the pricing feed's min/max prices. Unknown products are skipped.
    pub async fn apply_price_ranges(&self, records: &[PriceRangeRecord]) -> BatchReport {
        let mut report = BatchReport::new();
        for record in records {
            let outcome = match record.validate() {
                Some(msg) => Err(CatalogError::InvalidRequest(msg)),
                None => self
                    .repo
                    .set_price_range(&record.product_id, record.min_price, record.max_price)
                    .await
                    .map_err(|err| match err {
                        CatalogError::NotFound(id) => CatalogError::JoinMismatch(id),
                        other => other,
                    }),
            };
            report.record(&record.product_id, outcome);
        }
        info!(records = records.len(), skipped = report.skipped.len(), "Price ranges applied");
        report
    }

    /// Ids of in-stock products flagged `MULTI_BUY`, whose promotion labels
    /// the crawler should fetch.
    pub async fn multi_buy_candidates(&self) -> Result<Vec<String>> {
        Ok(self
            .repo
            .all_products()
            .await?
            .into_iter()
            .filter(|p| !p.stockout && p.has_flag(MULTI_BUY_FLAG))
            .map(|p| p.id)
            .collect())
    }
}
