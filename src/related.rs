//! Related Products
//!
//! Uncached neighbour lookup: same style family (id prefix) or same name.

use crate::catalog::CatalogRepository;
use crate::error::{CatalogError, Result};
use crate::models::{Product, ProductSummary};
use crate::views::ordering::related_order;

/// Leading `len` characters of a product id. Ids shorter than that are their
/// own key.
pub fn grouping_key(id: &str, len: usize) -> &str {
    match id.char_indices().nth(len) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// In-stock products sharing `product`'s grouping key or its exact name,
/// excluding `product` itself, cheapest first and ties by id descending.
///
/// No limit is applied.
pub async fn related_products(
    repo: &dyn CatalogRepository,
    product: &Product,
    prefix_len: usize,
) -> Result<Vec<ProductSummary>> {
    let key = grouping_key(&product.id, prefix_len);

    let mut related: Vec<Product> = repo
        .all_products()
        .await?
        .into_iter()
        .filter(|candidate| {
            !candidate.stockout
                && candidate.id != product.id
                && (candidate.id.starts_with(key) || candidate.name == product.name)
        })
        .collect();
    related.sort_by(related_order);

    Ok(related.iter().map(Product::summary).collect())
}

/// Looks the product up by id, then finds its related products.
pub async fn related_products_by_id(
    repo: &dyn CatalogRepository,
    id: &str,
    prefix_len: usize,
) -> Result<Vec<ProductSummary>> {
    let product = repo
        .find_product(id)
        .await?
        .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
    related_products(repo, &product, prefix_len).await
}
