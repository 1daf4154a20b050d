//! Configuration loading and representation.
//!
//! Everything is optional; an empty environment gives the stock behavior
//! (snapshot at `inventory.json`, low-stock threshold of 5).

use std::path::PathBuf;

use stockroom_inventory::DEFAULT_LOW_STOCK_THRESHOLD;

use crate::persistence::DEFAULT_DATA_FILE;

pub const DATA_FILE_VAR: &str = "STOCKROOM_DATA_FILE";
pub const LOW_STOCK_THRESHOLD_VAR: &str = "STOCKROOM_LOW_STOCK_THRESHOLD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the inventory snapshot is saved to and loaded from.
    pub data_file: PathBuf,
    /// Items strictly below this quantity are reported as low stock.
    pub low_stock_threshold: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset. An unparsable threshold logs a
    /// warning and falls back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(DATA_FILE_VAR) {
            config.data_file = PathBuf::from(path);
        }

        if let Some(raw) = get(LOW_STOCK_THRESHOLD_VAR) {
            match raw.trim().parse::<i64>() {
                Ok(threshold) => config.low_stock_threshold = threshold,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "{LOW_STOCK_THRESHOLD_VAR} is not an integer; using default {DEFAULT_LOW_STOCK_THRESHOLD}"
                ),
            }
        }

        config
    }
}
