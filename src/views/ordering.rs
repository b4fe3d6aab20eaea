//! View Ordering
//!
//! Comparators for each view's sort contract, usable with `sort_by`.

use std::cmp::Ordering;

use crate::models::Product;

/// Ascending `price / max_price`; products without a usable `max_price` first.
pub fn by_price_ratio(a: &Product, b: &Product) -> Ordering {
    match (a.price_ratio(), b.price_ratio()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

/// `limit_sales_end_msg`, then price ratio.
pub fn limited_offer_order(a: &Product, b: &Product) -> Ordering {
    a.limit_sales_end_msg
        .cmp(&b.limit_sales_end_msg)
        .then_with(|| by_price_ratio(a, b))
}

/// Promotion label, then price.
pub fn multi_buy_order(a: &Product, b: &Product) -> Ordering {
    a.multi_buy
        .cmp(&b.multi_buy)
        .then_with(|| a.price.cmp(&b.price))
}

pub fn sale_order(a: &Product, b: &Product) -> Ordering {
    by_price_ratio(a, b)
}

/// Price ratio, then newest first.
pub fn new_order(a: &Product, b: &Product) -> Ordering {
    by_price_ratio(a, b).then_with(|| b.created_at.cmp(&a.created_at))
}

/// Price ascending, then id descending.
pub fn related_order(a: &Product, b: &Product) -> Ordering {
    a.price.cmp(&b.price).then_with(|| b.id.cmp(&a.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn priced(id: &str, price: u64, max_price: Option<u64>) -> Product {
        let mut product = Product::new(id, id, price);
        product.max_price = max_price;
        product
    }

    #[test]
    fn test_ratio_missing_sorts_first() {
        let mut products = vec![
            priced("a", 90, Some(100)),
            priced("b", 50, None),
            priced("c", 10, Some(100)),
        ];
        products.sort_by(by_price_ratio);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_limited_offer_ties_on_message() {
        let mut products = vec![
            priced("a", 80, Some(100)),
            priced("b", 30, Some(100)),
            priced("c", 10, Some(100)),
        ];
        products[0].limit_sales_end_msg = "Until 3/10".to_string();
        products[1].limit_sales_end_msg = "Until 3/10".to_string();
        products[2].limit_sales_end_msg = "Until 3/17".to_string();

        products.sort_by(limited_offer_order);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_new_order_prefers_recent_on_ratio_tie() {
        let mut older = priced("older", 50, Some(100));
        let newer = priced("newer", 50, Some(100));
        older.created_at = newer.created_at - Duration::days(3);

        let mut products = vec![older, newer];
        products.sort_by(new_order);
        assert_eq!(products[0].id, "newer");
    }

    #[test]
    fn test_related_order() {
        let mut products = vec![
            priced("123456-AA", 200, None),
            priced("123456-BB", 100, None),
            priced("123456-CC", 100, None),
        ];
        products.sort_by(related_order);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["123456-CC", "123456-BB", "123456-AA"]);
    }

    #[test]
    fn test_multi_buy_order() {
        let mut a = priced("a", 300, None);
        a.multi_buy = Some("2 for 590".to_string());
        let mut b = priced("b", 100, None);
        b.multi_buy = Some("3 for 990".to_string());
        let mut c = priced("c", 200, None);
        c.multi_buy = Some("2 for 590".to_string());

        let mut products = vec![a, b, c];
        products.sort_by(multi_buy_order);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
