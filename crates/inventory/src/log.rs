use chrono::{DateTime, Utc};

use crate::name::ItemName;

/// Timestamped record of a successful add.
///
/// Collected into a caller-owned `Vec<LogEntry>`; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub occurred_at: DateTime<Utc>,
    pub quantity: i64,
    pub item: ItemName,
}

impl core::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}: Added {} of {}",
            self.occurred_at, self.quantity, self.item
        )
    }
}
