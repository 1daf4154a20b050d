//! Human-readable stock listing.

use crate::name::ItemName;

const HEADER: &str = "=== Inventory Report ===";
const FOOTER: &str = "========================";

/// Point-in-time listing of every item and its quantity.
///
/// Rendering goes through `Display`, so callers decide where it is written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StockReport {
    pub lines: Vec<(ItemName, i64)>,
}

impl core::fmt::Display for StockReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{HEADER}")?;
        for (item, quantity) in &self.lines {
            writeln!(f, "{item} -> {quantity}")?;
        }
        writeln!(f, "{FOOTER}")
    }
}
