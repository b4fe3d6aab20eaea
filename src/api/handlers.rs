//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::catalog::{get_products_by_ids, CatalogRepository, InMemoryCatalog};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::derive::{derive_freshness, merge_promotions};
use crate::error::{CatalogError, Result};
use crate::ingest::Ingestor;
use crate::models::{
    AsOfQuery, BatchReportResponse, ExternalProductRecord, ExternalPromotionRecord,
    HealthResponse, IdsResponse, LookupRequest, PriceRangeRecord, Product, ProductsResponse,
    StatsResponse, ViewResponse,
};
use crate::related::related_products_by_id;
use crate::tasks::{run_derivation_cycle, CycleReport};
use crate::views::{ViewName, ViewStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub views: Arc<ViewStore>,
    pub ingestor: Arc<Ingestor>,
    pub clock: Arc<dyn Clock>,
    pub related_prefix_len: usize,
}

impl AppState {
    /// Wires the view store and ingestor over the given catalog.
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        clock: Arc<dyn Clock>,
        config: &Config,
    ) -> Self {
        let views = ViewStore::new(catalog.clone(), clock.clone(), config.stockout_window_days);
        let ingestor = Ingestor::new(
            catalog.clone(),
            clock.clone(),
            config.image_base_url.clone(),
        );
        Self {
            catalog,
            views: Arc::new(views),
            ingestor: Arc::new(ingestor),
            clock,
            related_prefix_len: config.related_prefix_len,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses an in-memory catalog and the system clock.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(InMemoryCatalog::new()), Arc::new(SystemClock), config)
    }

    fn as_of(&self, query: &AsOfQuery) -> chrono::NaiveDate {
        query.as_of.unwrap_or_else(|| self.clock.today())
    }
}

// == Views ==

/// Handler for GET /views/:name
pub async fn get_view_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ViewResponse>> {
    let view: ViewName = name.parse()?;
    let contents = state.views.get(view).await?;
    Ok(Json(ViewResponse::new(view.as_str(), &contents)))
}

/// Handler for PUT /views/:name
///
/// Recomputes the view from current product rows. `as_of` defaults to today
/// and only affects the stockout view.
pub async fn populate_view_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<ViewResponse>> {
    let view: ViewName = name.parse()?;
    let contents = state.views.populate_as_of(view, state.as_of(&query)).await?;
    Ok(Json(ViewResponse::new(view.as_str(), &contents)))
}

/// Handler for DELETE /views/:name
pub async fn invalidate_view_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode> {
    let view: ViewName = name.parse()?;
    state.views.invalidate(view).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stockout
pub async fn stockout_handler(State(state): State<AppState>) -> Result<Json<ViewResponse>> {
    let contents = state.views.stockout_snapshot().await?;
    Ok(Json(ViewResponse::new(ViewName::Stockout.as_str(), &contents)))
}

// == Products ==

/// Handler for GET /products/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    state
        .catalog
        .find_product(&id)
        .await?
        .map(Json)
        .ok_or(CatalogError::NotFound(id))
}

/// Handler for GET /products/:id/related
pub async fn related_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductsResponse>> {
    let related =
        related_products_by_id(state.catalog.as_ref(), &id, state.related_prefix_len).await?;
    Ok(Json(ProductsResponse::new(related)))
}

/// Handler for POST /products/lookup
///
/// Hydrates search result ids into catalog entries, keeping their order.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Json(req): Json<LookupRequest>,
) -> Result<Json<ProductsResponse>> {
    let products = get_products_by_ids(state.catalog.as_ref(), &req.ids).await?;
    Ok(Json(ProductsResponse::new(
        products.iter().map(Product::summary).collect(),
    )))
}

// == Ingestion ==

/// Handler for POST /ingest/products
pub async fn ingest_products_handler(
    State(state): State<AppState>,
    Json(records): Json<Vec<ExternalProductRecord>>,
) -> Json<BatchReportResponse> {
    let report = state.ingestor.ingest_products(&records).await;
    Json(BatchReportResponse::new("ingest_products", None, report))
}

/// Handler for POST /ingest/promotions
pub async fn ingest_promotions_handler(
    State(state): State<AppState>,
    Json(records): Json<Vec<ExternalPromotionRecord>>,
) -> Json<BatchReportResponse> {
    let report = state.ingestor.ingest_promotions(&records).await;
    Json(BatchReportResponse::new("ingest_promotions", None, report))
}

/// Handler for POST /ingest/price-ranges
pub async fn ingest_price_ranges_handler(
    State(state): State<AppState>,
    Json(records): Json<Vec<PriceRangeRecord>>,
) -> Json<BatchReportResponse> {
    let report = state.ingestor.apply_price_ranges(&records).await;
    Json(BatchReportResponse::new("price_ranges", None, report))
}

/// Handler for GET /ingest/multi-buy-candidates
pub async fn multi_buy_candidates_handler(
    State(state): State<AppState>,
) -> Result<Json<IdsResponse>> {
    let ids = state.ingestor.multi_buy_candidates().await?;
    Ok(Json(IdsResponse::new(ids)))
}

// == Derivation ==

/// Handler for POST /derive/freshness
pub async fn derive_freshness_handler(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<BatchReportResponse>> {
    let as_of = state.as_of(&query);
    let report = derive_freshness(state.catalog.as_ref(), as_of).await?;
    Ok(Json(BatchReportResponse::new("freshness", Some(as_of), report)))
}

/// Handler for POST /derive/promotions
pub async fn derive_promotions_handler(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<BatchReportResponse>> {
    let as_of = state.as_of(&query);
    let report = merge_promotions(state.catalog.as_ref(), as_of).await?;
    Ok(Json(BatchReportResponse::new("promotions", Some(as_of), report)))
}

/// Handler for POST /derive/cycle
pub async fn derive_cycle_handler(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<CycleReport>> {
    let as_of = state.as_of(&query);
    let report = run_derivation_cycle(state.catalog.as_ref(), &state.views, as_of).await?;
    Ok(Json(report))
}

// == Service ==

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.views.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
