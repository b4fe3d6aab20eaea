//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Longest stockout decay window accepted from the environment.
pub const MAX_STOCKOUT_WINDOW_DAYS: i64 = 3650;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Seconds between background derivation cycles, 0 disables the task
    pub derive_interval: u64,
    /// Length in days of the stockout decay window
    pub stockout_window_days: i64,
    /// Number of leading id characters that form the related-products grouping key
    pub related_prefix_len: usize,
    /// Base URL product main images are built from
    pub image_base_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DERIVE_INTERVAL` - Derivation cycle frequency in seconds (default: 3600)
    /// - `STOCKOUT_WINDOW_DAYS` - Decay window for the stockout view, 1 to 3650 (default: 7)
    /// - `RELATED_PREFIX_LEN` - Id prefix length for related products (default: 6)
    /// - `IMAGE_BASE_URL` - Product image base URL
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            derive_interval: parse_var("DERIVE_INTERVAL").unwrap_or(defaults.derive_interval),
            stockout_window_days: parse_var::<i64>("STOCKOUT_WINDOW_DAYS")
                .filter(valid_window_days)
                .unwrap_or(defaults.stockout_window_days),
            related_prefix_len: parse_var::<usize>("RELATED_PREFIX_LEN")
                .filter(|len| *len > 0)
                .unwrap_or(defaults.related_prefix_len),
            image_base_url: env::var("IMAGE_BASE_URL").unwrap_or(defaults.image_base_url),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn valid_window_days(days: &i64) -> bool {
    (1..=MAX_STOCKOUT_WINDOW_DAYS).contains(days)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            derive_interval: 3600,
            stockout_window_days: 7,
            related_prefix_len: 6,
            image_base_url: "https://im.uniqlo.com/images/tw/uq/pc/goods".to_string(),
        }
    }
}
