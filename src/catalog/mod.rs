//! Catalog Module
//!
//! Product rows and history logs, plus the id lookup used to hydrate search
//! results into catalog entries.

mod memory;
mod repository;

pub use memory::InMemoryCatalog;
pub use repository::CatalogRepository;

use crate::error::Result;
use crate::models::Product;

/// Hydrates external search hits into catalog products.
///
/// Preserves the order of `ids`; ids with no matching product are dropped.
pub async fn get_products_by_ids(
    repo: &dyn CatalogRepository,
    ids: &[String],
) -> Result<Vec<Product>> {
    let products = repo.products_by_ids(ids).await?;
    if products.len() < ids.len() {
        tracing::debug!(
            requested = ids.len(),
            found = products.len(),
            "Some search hits have no catalog entry"
        );
    }
    Ok(products)
}
