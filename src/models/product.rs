//! Product Module
//!
//! The catalog entity of record and the fixed column projection cached by views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Product ==
/// A catalog product as stored by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable external identifier; its leading characters encode the style family
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub main_image_url: String,
    /// Marketing copy shown on the detail page
    #[serde(default)]
    pub comment: String,
    /// Current sale price
    pub price: u64,
    /// Lowest variant price, set by the pricing feed
    pub min_price: Option<u64>,
    /// Highest variant price, set by the pricing feed
    pub max_price: Option<u64>,
    /// Non-empty iff a limited-time offer is active
    #[serde(default)]
    pub limit_sales_end_msg: String,
    /// Active promotion label, derived from today's promotion history
    pub multi_buy: Option<String>,
    pub new: bool,
    pub sale: bool,
    /// True iff today's ingestion run did not observe the product
    pub stockout: bool,
    /// Flags carried by the representative SKU (e.g. `SALE`, `MULTI_BUY`)
    #[serde(default)]
    pub sku_flags: Vec<String>,
    #[serde(default)]
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product with the given identity and price and every flag cleared.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u64) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            category_id: String::new(),
            main_image_url: String::new(),
            comment: String::new(),
            price,
            min_price: None,
            max_price: None,
            limit_sales_end_msg: String::new(),
            multi_buy: None,
            new: false,
            sale: false,
            stockout: false,
            sku_flags: Vec::new(),
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Ratio of the current price to the highest variant price.
    ///
    /// Undefined (`None`) when the pricing feed has not supplied a positive
    /// `max_price`.
    pub fn price_ratio(&self) -> Option<f64> {
        match self.max_price {
            Some(max) if max > 0 => Some(self.price as f64 / max as f64),
            _ => None,
        }
    }

    /// Whether a limited-time offer is active.
    pub fn has_limited_offer(&self) -> bool {
        !self.limit_sales_end_msg.is_empty()
    }

    /// Whether the representative SKU carries the named flag.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.sku_flags.iter().any(|f| f == flag)
    }

    /// Projects the columns cached by views.
    pub fn summary(&self) -> ProductSummary {
        ProductSummary::from(self)
    }
}

// == Product Summary ==
/// Identity, display and pricing columns of a product.
///
/// Views cache this projection rather than full rows to keep payloads small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub main_image_url: String,
    pub price: u64,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub limit_sales_end_msg: String,
    pub multi_buy: Option<String>,
    pub new: bool,
    pub sale: bool,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category_id: product.category_id.clone(),
            main_image_url: product.main_image_url.clone(),
            price: product.price,
            min_price: product.min_price,
            max_price: product.max_price,
            limit_sales_end_msg: product.limit_sales_end_msg.clone(),
            multi_buy: product.multi_buy.clone(),
            new: product.new,
            sale: product.sale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_ratio() {
        let mut product = Product::new("123456-AA", "Tee", 100);
        assert_eq!(product.price_ratio(), None);

        product.max_price = Some(0);
        assert_eq!(product.price_ratio(), None);

        product.max_price = Some(200);
        assert_eq!(product.price_ratio(), Some(0.5));
    }

    #[test]
    fn test_flags() {
        let mut product = Product::new("123456-AA", "Tee", 100);
        assert!(!product.has_limited_offer());
        assert!(!product.has_flag("MULTI_BUY"));

        product.limit_sales_end_msg = "Until 3/31".to_string();
        product.sku_flags = vec!["SALE".to_string(), "MULTI_BUY".to_string()];
        assert!(product.has_limited_offer());
        assert!(product.has_flag("MULTI_BUY"));
    }

    #[test]
    fn test_summary_projection_omits_internal_columns() {
        let mut product = Product::new("123456-AA", "Tee", 100);
        product.stockout = true;
        product.comment = "Soft cotton".to_string();

        let json = serde_json::to_value(product.summary()).unwrap();
        assert_eq!(json["id"], "123456-AA");
        assert!(json.get("stockout").is_none());
        assert!(json.get("comment").is_none());
        assert!(json.get("created_at").is_none());
    }
}
