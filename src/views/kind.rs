//! View Names
//!
//! The five named cache slots.

use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// A named cache view over the product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewName {
    /// Products with an active limited-time offer
    LimitedOffer,
    /// Products with an active promotion label
    MultiBuy,
    Sale,
    New,
    /// Products last observed within the decay window but not today
    Stockout,
}

impl ViewName {
    pub const ALL: [ViewName; 5] = [
        ViewName::LimitedOffer,
        ViewName::MultiBuy,
        ViewName::Sale,
        ViewName::New,
        ViewName::Stockout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewName::LimitedOffer => "limited_offer",
            ViewName::MultiBuy => "multi_buy",
            ViewName::Sale => "sale",
            ViewName::New => "new",
            ViewName::Stockout => "stockout",
        }
    }

    /// Key the slot is stored under, e.g. `product:sale`.
    pub fn cache_key(&self) -> String {
        format!("product:{}", self.as_str())
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewName {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewName::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownView(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for view in ViewName::ALL {
            assert_eq!(view.as_str().parse::<ViewName>().unwrap(), view);
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        assert!(matches!(
            "clearance".parse::<ViewName>(),
            Err(CatalogError::UnknownView(_))
        ));
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(ViewName::LimitedOffer.cache_key(), "product:limited_offer");
    }
}
