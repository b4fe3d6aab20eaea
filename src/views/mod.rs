//! Views Module
//!
//! Named, lazily populated cache slots holding ordered product projections.
//!
//! # Views
//! - `limited_offer` - active limited-time offers, by end message then price ratio
//! - `multi_buy` - active promotions, by label then price
//! - `sale` - sale products, by price ratio
//! - `new` - new arrivals, by price ratio then newest first
//! - `stockout` - products last seen within the decay window, most recent first

mod builder;
mod kind;
pub mod ordering;
mod stats;
mod store;


// Re-export public types
pub use builder::{build_view, decay_window_ids};
pub use kind::ViewName;
pub use stats::ViewStats;
pub use store::{ViewContents, ViewStore};
