use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use thiserror::Error;

use stockroom_core::DomainError;

use crate::log::LogEntry;
use crate::name::ItemName;
use crate::report::StockReport;

/// Item name -> quantity. Ordered so listings and snapshots are deterministic.
pub type StockLevels = BTreeMap<ItemName, i64>;

/// Threshold used by callers that do not pick one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Arguments were of the wrong shape (non-string name, non-integer quantity, empty name).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    /// The item is not stocked.
    #[error("item '{0}' not found in stock")]
    NotFound(String),

    /// The quantity arithmetic could not be carried out (e.g. i64 overflow).
    #[error("{0}")]
    Invariant(DomainError),
}

/// Outcome of a successful `remove`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Removal {
    /// Stock left after the decrement.
    Remaining(i64),
    /// The quantity reached zero or below and the item was deleted.
    Depleted,
}

/// In-memory inventory: the current stock level of every item.
///
/// Owned by the caller; there is no process-wide instance. Mutations go through
/// `&mut self`, so a store has a single writer at any time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryStore {
    levels: StockLevels,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_levels(levels: StockLevels) -> Self {
        Self { levels }
    }

    /// Add `quantity` units of `name`, creating the item if needed.
    ///
    /// Negative quantities are accepted and lower the stock level; the entry is
    /// kept even when the result is zero or negative. Returns the new quantity.
    pub fn add(
        &mut self,
        name: &str,
        quantity: i64,
        log: Option<&mut Vec<LogEntry>>,
    ) -> InventoryResult<i64> {
        self.add_at(name, quantity, log, Utc::now())
    }

    /// Same as [`add`](Self::add) with an explicit timestamp for the log entry.
    pub fn add_at(
        &mut self,
        name: &str,
        quantity: i64,
        log: Option<&mut Vec<LogEntry>>,
        occurred_at: DateTime<Utc>,
    ) -> InventoryResult<i64> {
        let item = ItemName::new(name).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected add");
        })?;

        let current = self.quantity(item.as_str());
        let updated = current.checked_add(quantity).ok_or_else(|| {
            InventoryError::Invariant(DomainError::invariant(format!(
                "adding {quantity} to '{item}' overflows the stock level"
            )))
        })?;

        self.levels.insert(item.clone(), updated);
        tracing::debug!(item = %item, delta = quantity, quantity = updated, "stock added");

        if let Some(log) = log {
            log.push(LogEntry {
                occurred_at,
                quantity,
                item,
            });
        }

        Ok(updated)
    }

    /// Add from loosely-typed input (e.g. a decoded request body).
    ///
    /// `name` must be a JSON string and `quantity` a JSON integer that fits in
    /// `i64`; anything else is `InvalidInput` and the store is left unchanged.
    pub fn add_untyped(
        &mut self,
        name: &JsonValue,
        quantity: &JsonValue,
        log: Option<&mut Vec<LogEntry>>,
    ) -> InventoryResult<i64> {
        let (Some(name), Some(quantity)) = (name.as_str(), quantity.as_i64()) else {
            tracing::warn!(%name, %quantity, "rejected add: wrong argument types");
            return Err(InventoryError::InvalidInput(DomainError::validation(
                "name must be a string and quantity an integer",
            )));
        };
        self.add(name, quantity, log)
    }

    /// Remove `quantity` units of `name`.
    ///
    /// When the remaining stock is zero or below, the item is deleted outright,
    /// so afterwards it is indistinguishable from an item that never existed.
    pub fn remove(&mut self, name: &str, quantity: i64) -> InventoryResult<Removal> {
        let Some(current) = self.levels.get(name).copied() else {
            tracing::warn!(item = name, "remove of unknown item");
            return Err(InventoryError::NotFound(name.to_string()));
        };

        let remaining = current.checked_sub(quantity).ok_or_else(|| {
            InventoryError::Invariant(DomainError::invariant(format!(
                "removing {quantity} from '{name}' overflows the stock level"
            )))
        })?;

        if remaining <= 0 {
            self.levels.remove(name);
            tracing::debug!(item = name, removed = quantity, "stock depleted; item removed");
            return Ok(Removal::Depleted);
        }

        if let Some(level) = self.levels.get_mut(name) {
            *level = remaining;
        }
        tracing::debug!(item = name, removed = quantity, quantity = remaining, "stock removed");
        Ok(Removal::Remaining(remaining))
    }

    /// Current quantity of `name`, or 0 when it is not stocked.
    pub fn quantity(&self, name: &str) -> i64 {
        self.levels.get(name).copied().unwrap_or(0)
    }

    /// Items whose quantity is strictly below `threshold`, in name order.
    pub fn low_stock(&self, threshold: i64) -> Vec<ItemName> {
        self.levels
            .iter()
            .filter(|(_, quantity)| **quantity < threshold)
            .map(|(item, _)| item.clone())
            .collect()
    }

    pub fn report(&self) -> StockReport {
        StockReport {
            lines: self
                .levels
                .iter()
                .map(|(item, quantity)| (item.clone(), *quantity))
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.levels.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, i64)> {
        self.levels.iter().map(|(item, quantity)| (item, *quantity))
    }

    pub fn levels(&self) -> &StockLevels {
        &self.levels
    }

    pub fn snapshot(&self) -> StockLevels {
        self.levels.clone()
    }

    /// Replace the whole inventory (used when loading a snapshot).
    pub fn replace(&mut self, levels: StockLevels) {
        self.levels = levels;
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn store_with(items: &[(&str, i64)]) -> InventoryStore {
        let mut store = InventoryStore::new();
        for (name, quantity) in items {
            store.add(name, *quantity, None).unwrap();
        }
        store
    }

    #[test]
    fn repeated_adds_accumulate() {
        let mut store = InventoryStore::new();
        store.add("x", 5, None).unwrap();
        store.add("x", 3, None).unwrap();
        assert_eq!(store.quantity("x"), 8);
    }

    #[test]
    fn add_appends_log_entry_when_collector_given() {
        let mut store = InventoryStore::new();
        let mut log = Vec::new();

        store.add("apple", 10, Some(&mut log)).unwrap();
        store.add("banana", 2, None).unwrap();

        assert_eq!(log.len(), 1);
        assert_eq!(log[0].quantity, 10);
        assert_eq!(log[0].item.as_str(), "apple");
        assert!(log[0].to_string().ends_with(": Added 10 of apple"));
    }

    #[test]
    fn negative_add_lowers_stock_and_keeps_entry() {
        let mut store = store_with(&[("apple", 3)]);
        assert_eq!(store.add("apple", -5, None).unwrap(), -2);
        assert!(store.contains("apple"));
        assert_eq!(store.quantity("apple"), -2);
    }

    #[test]
    fn add_with_empty_name_is_invalid_input() {
        let mut store = store_with(&[("apple", 3)]);
        let before = store.clone();
        let mut log = Vec::new();

        let err = store.add("", 4, Some(&mut log)).unwrap_err();

        assert!(matches!(err, InventoryError::InvalidInput(_)));
        assert_eq!(store, before);
        assert!(log.is_empty());
    }

    #[test]
    fn untyped_add_rejects_wrong_types() {
        let mut store = store_with(&[("apple", 3)]);
        let before = store.clone();

        let err = store.add_untyped(&json!(123), &json!("bad"), None).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidInput(_)));

        let err = store.add_untyped(&json!("apple"), &json!(1.5), None).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidInput(_)));

        assert_eq!(store, before);
    }

    #[test]
    fn untyped_add_accepts_string_and_integer() {
        let mut store = InventoryStore::new();
        assert_eq!(store.add_untyped(&json!("pear"), &json!(4), None).unwrap(), 4);
        assert_eq!(store.quantity("pear"), 4);
    }

    #[test]
    fn add_overflow_leaves_store_unchanged() {
        let mut store = store_with(&[("apple", i64::MAX)]);
        let err = store.add("apple", 1, None).unwrap_err();
        assert!(matches!(err, InventoryError::Invariant(_)));
        assert_eq!(store.quantity("apple"), i64::MAX);
    }

    #[test]
    fn partial_remove_decrements() {
        let mut store = store_with(&[("apple", 10)]);
        assert_eq!(store.remove("apple", 3).unwrap(), Removal::Remaining(7));
        assert_eq!(store.quantity("apple"), 7);
    }

    #[test]
    fn removing_everything_deletes_the_item() {
        let mut store = store_with(&[("apple", 10)]);
        assert_eq!(store.remove("apple", 10).unwrap(), Removal::Depleted);
        assert!(!store.contains("apple"));
        assert_eq!(store.quantity("apple"), 0);
    }

    #[test]
    fn over_removal_deletes_instead_of_going_negative() {
        let mut store = store_with(&[("apple", 2)]);
        assert_eq!(store.remove("apple", 5).unwrap(), Removal::Depleted);
        assert!(store.is_empty());
    }

    #[test]
    fn removing_unknown_item_is_not_found() {
        let mut store = store_with(&[("apple", 10)]);
        let before = store.clone();

        let err = store.remove("orange", 1).unwrap_err();

        assert_eq!(err, InventoryError::NotFound("orange".to_string()));
        assert_eq!(err.to_string(), "item 'orange' not found in stock");
        assert_eq!(store, before);
    }

    #[test]
    fn remove_overflow_leaves_store_unchanged() {
        let mut store = store_with(&[("apple", -2)]);
        let err = store.remove("apple", i64::MAX).unwrap_err();
        assert!(matches!(err, InventoryError::Invariant(_)));
        assert_eq!(store.quantity("apple"), -2);
    }

    #[test]
    fn quantity_of_unknown_item_is_zero() {
        assert_eq!(InventoryStore::new().quantity("ghost"), 0);
    }

    #[test]
    fn low_stock_is_strictly_below_threshold() {
        let store = store_with(&[("apple", 7), ("banana", 2), ("grape", 12)]);
        let low: Vec<_> = store
            .low_stock(DEFAULT_LOW_STOCK_THRESHOLD)
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(low, vec!["banana".to_string()]);

        let store = store_with(&[("kiwi", 5)]);
        assert!(store.low_stock(5).is_empty());
    }

    #[test]
    fn report_lists_items_in_name_order() {
        let store = store_with(&[("grape", 12), ("apple", 7)]);
        let report = store.report();
        let names: Vec<_> = report.lines.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["apple", "grape"]);
        assert!(report.to_string().contains("apple -> 7\ngrape -> 12\n"));
    }

    #[test]
    fn replace_swaps_whole_inventory() {
        let mut store = store_with(&[("apple", 7)]);
        let other = store_with(&[("pear", 1)]).snapshot();

        store.replace(other.clone());

        assert_eq!(store.levels(), &other);
        assert!(!store.contains("apple"));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: add always increases the stored quantity by exactly the delta.
        #[test]
        fn add_increases_by_delta(
            seed in -1_000_000i64..1_000_000i64,
            delta in -1_000_000i64..1_000_000i64,
            name in "[a-z]{1,8}",
        ) {
            let mut store = InventoryStore::new();
            store.add(&name, seed, None).unwrap();
            let before = store.quantity(&name);

            store.add(&name, delta, None).unwrap();

            prop_assert_eq!(store.quantity(&name), before + delta);
        }

        /// Property: after any sequence of removes, no positive-stock item has been
        /// turned into a stored non-positive quantity.
        #[test]
        fn remove_never_leaves_non_positive_entries(
            initial in prop::collection::btree_map("[a-z]{1,6}", 1i64..100, 1..8),
            removals in prop::collection::vec(("[a-z]{1,6}", 1i64..50), 0..20),
        ) {
            let mut store = InventoryStore::new();
            for (name, quantity) in &initial {
                store.add(name, *quantity, None).unwrap();
            }

            for (name, quantity) in &removals {
                let _ = store.remove(name, *quantity);
            }

            for (_, quantity) in store.iter() {
                prop_assert!(quantity > 0);
            }
        }

        /// Property: low_stock returns exactly the items below the threshold.
        #[test]
        fn low_stock_partitions_items(
            initial in prop::collection::btree_map("[a-z]{1,6}", -50i64..50, 0..10),
            threshold in -60i64..60,
        ) {
            let mut store = InventoryStore::new();
            for (name, quantity) in &initial {
                store.add(name, *quantity, None).unwrap();
            }

            let low = store.low_stock(threshold);
            for (name, quantity) in store.iter() {
                prop_assert_eq!(low.contains(name), quantity < threshold);
            }
        }
    }
}
