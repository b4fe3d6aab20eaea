//! Response DTOs
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::NaiveDate;
use serde::Serialize;

use crate::derive::BatchReport;
use crate::models::ProductSummary;
use crate::views::ViewStats;

/// Response body for view reads (GET /views/:name, GET /stockout)
#[derive(Debug, Clone, Serialize)]
pub struct ViewResponse {
    pub view: String,
    pub count: usize,
    pub products: Vec<ProductSummary>,
}

impl ViewResponse {
    pub fn new(view: impl Into<String>, products: &[ProductSummary]) -> Self {
        Self {
            view: view.into(),
            count: products.len(),
            products: products.to_vec(),
        }
    }
}

/// Response body for uncached product lists (related products, lookups)
#[derive(Debug, Clone, Serialize)]
pub struct ProductsResponse {
    pub count: usize,
    pub products: Vec<ProductSummary>,
}

impl ProductsResponse {
    pub fn new(products: Vec<ProductSummary>) -> Self {
        Self {
            count: products.len(),
            products,
        }
    }
}

/// Response body listing product ids
#[derive(Debug, Clone, Serialize)]
pub struct IdsResponse {
    pub count: usize,
    pub ids: Vec<String>,
}

impl IdsResponse {
    pub fn new(ids: Vec<String>) -> Self {
        Self {
            count: ids.len(),
            ids,
        }
    }
}

/// Response body for a batch operation (ingestion or derivation)
#[derive(Debug, Clone, Serialize)]
pub struct BatchReportResponse {
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    #[serde(flatten)]
    pub report: BatchReport,
}

impl BatchReportResponse {
    pub fn new(
        operation: impl Into<String>,
        as_of: Option<NaiveDate>,
        report: BatchReport,
    ) -> Self {
        Self {
            operation: operation.into(),
            as_of,
            report,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub populations: u64,
    pub failed_populations: u64,
    pub populated_views: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<ViewStats> for StatsResponse {
    fn from(stats: ViewStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            populations: stats.populations,
            failed_populations: stats.failed_populations,
            populated_views: stats.populated_views,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
