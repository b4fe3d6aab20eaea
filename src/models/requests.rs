//! Request DTOs
//!
//! Strict schemas for records arriving from the crawler and for HTTP request
//! bodies. Records are validated once here and never re-checked by the core.

use chrono::NaiveDate;
use serde::Deserialize;

/// A product record as delivered by the external catalog crawl.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProductRecord {
    pub id: String,
    pub name: String,
    pub parent_category_id: String,
    #[serde(default)]
    pub catch_copy: String,
    #[serde(rename = "representativeSKU")]
    pub representative_sku: RepresentativeSku,
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub review_count: u32,
}

/// The SKU the external catalog uses to represent a product's price and flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativeSku {
    pub sale_price: u64,
    pub color: String,
    #[serde(default)]
    pub flags: Vec<SkuFlag>,
    #[serde(default)]
    pub limit_sales_end_msg: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkuFlag {
    pub name: String,
}

impl ExternalProductRecord {
    /// Validates the record
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.id.trim().is_empty() {
            return Some("Product id cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Some(format!("Product {} has an empty name", self.id));
        }
        None
    }

    pub fn flag_names(&self) -> Vec<String> {
        self.representative_sku
            .flags
            .iter()
            .map(|flag| flag.name.clone())
            .collect()
    }
}

/// A promotion label scraped for a product during the crawl.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalPromotionRecord {
    pub product_id: String,
    pub label: String,
}

impl ExternalPromotionRecord {
    pub fn validate(&self) -> Option<String> {
        if self.product_id.is_empty() {
            return Some("Product id cannot be empty".to_string());
        }
        if self.label.trim().is_empty() {
            return Some(format!("Promotion for {} has an empty label", self.product_id));
        }
        None
    }
}

/// A row of the external pricing feed.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRangeRecord {
    pub product_id: String,
    pub min_price: u64,
    pub max_price: u64,
}

impl PriceRangeRecord {
    pub fn validate(&self) -> Option<String> {
        if self.min_price > self.max_price {
            return Some(format!(
                "Price range for {} is inverted ({} > {})",
                self.product_id, self.min_price, self.max_price
            ));
        }
        None
    }
}

/// Request body for POST /products/lookup
#[derive(Debug, Clone, Deserialize)]
pub struct LookupRequest {
    pub ids: Vec<String>,
}

/// Optional `?as_of=YYYY-MM-DD` override for derivation and view population endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AsOfQuery {
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}
