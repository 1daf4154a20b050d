//! Inventory domain module.
//!
//! This crate contains the stock-keeping rules, implemented purely as
//! in-memory domain logic (no file IO, no presentation).

pub mod log;
pub mod name;
pub mod report;
pub mod store;

pub use log::LogEntry;
pub use name::ItemName;
pub use report::StockReport;
pub use store::{
    DEFAULT_LOW_STOCK_THRESHOLD, InventoryError, InventoryResult, InventoryStore, Removal,
    StockLevels,
};
