//! Catalog data model and the DTOs used at the HTTP and ingestion boundaries.

pub mod history;
pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use history::{PriceHistoryEntry, PromotionHistoryEntry};
pub use product::{Product, ProductSummary};
pub use requests::{
    AsOfQuery, ExternalProductRecord, ExternalPromotionRecord, LookupRequest, PriceRangeRecord,
    RepresentativeSku, SkuFlag,
};
pub use responses::{
    BatchReportResponse, HealthResponse, IdsResponse, ProductsResponse, StatsResponse,
    ViewResponse,
};
