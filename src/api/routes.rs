//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    derive_cycle_handler, derive_freshness_handler, derive_promotions_handler, get_product_handler,
    get_view_handler, health_handler, ingest_price_ranges_handler, ingest_products_handler,
    ingest_promotions_handler, invalidate_view_handler, lookup_handler,
    multi_buy_candidates_handler, populate_view_handler, related_handler, stats_handler,
    stockout_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET|PUT|DELETE /views/:name` - Read, repopulate or drop a cached view
/// - `GET /stockout` - Recently available, now missing products
/// - `GET /products/:id`, `GET /products/:id/related`, `POST /products/lookup`
/// - `POST /ingest/products|promotions|price-ranges`, `GET /ingest/multi-buy-candidates`
/// - `POST /derive/freshness|promotions|cycle` - Batch derivations, `?as_of=YYYY-MM-DD`
/// - `GET /stats`, `GET /health`
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/views/:name",
            get(get_view_handler)
                .put(populate_view_handler)
                .delete(invalidate_view_handler),
        )
        .route("/stockout", get(stockout_handler))
        .route("/products/lookup", post(lookup_handler))
        .route("/products/:id", get(get_product_handler))
        .route("/products/:id/related", get(related_handler))
        .route("/ingest/products", post(ingest_products_handler))
        .route("/ingest/promotions", post(ingest_promotions_handler))
        .route("/ingest/price-ranges", post(ingest_price_ranges_handler))
        .route("/ingest/multi-buy-candidates", get(multi_buy_candidates_handler))
        .route("/derive/freshness", post(derive_freshness_handler))
        .route("/derive/promotions", post(derive_promotions_handler))
        .route("/derive/cycle", post(derive_cycle_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
