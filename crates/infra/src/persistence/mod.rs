//! Inventory snapshot persistence.
//!
//! A snapshot is the whole stock mapping encoded as one JSON object
//! (`{"apple": 7, "banana": 2}`), written with 4-space indentation. There is no
//! version field and no checksum.

pub mod in_memory;
pub mod json_file;

use std::io;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use thiserror::Error;

use stockroom_inventory::{InventoryStore, StockLevels};

pub use in_memory::InMemoryRepository;
pub use json_file::JsonFileRepository;

/// Snapshot path used when none is configured.
pub const DEFAULT_DATA_FILE: &str = "inventory.json";

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on '{location}': {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },

    /// The snapshot is not valid JSON (syntax error, truncated, not UTF-8).
    #[error("'{location}' is not valid JSON: {source}")]
    Corrupted {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but not an object mapping non-empty names to integers.
    #[error("'{location}' is not a mapping of item names to integer quantities: {source}")]
    InvalidShape {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize inventory: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl PersistenceError {
    /// True for the two decode failures (bad JSON, wrong shape).
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Corrupted { .. } | Self::InvalidShape { .. })
    }
}

/// Result of loading a snapshot into a store.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store now holds exactly the snapshot's items.
    Loaded { items: usize },
    /// No snapshot exists; the store was reset to empty.
    Missing,
}

/// Storage seam for inventory snapshots.
pub trait SnapshotRepository {
    /// Human-readable location used in messages (a file path, `memory`, ...).
    fn location(&self) -> String;

    /// Overwrite the stored snapshot with `levels`.
    fn save(&self, levels: &StockLevels) -> Result<(), PersistenceError>;

    /// Read the stored snapshot; `Ok(None)` when none exists.
    fn load(&self) -> Result<Option<StockLevels>, PersistenceError>;
}

/// Persist the whole store. The store itself is never modified.
pub fn save_store<R: SnapshotRepository>(
    store: &InventoryStore,
    repo: &R,
) -> Result<(), PersistenceError> {
    repo.save(store.levels()).inspect_err(|e| {
        tracing::error!(location = %repo.location(), error = %e, "failed to save inventory");
    })?;
    tracing::info!(location = %repo.location(), items = store.len(), "inventory saved");
    Ok(())
}

/// Replace the store's contents with the stored snapshot.
///
/// - no snapshot: the store is reset to empty and `LoadOutcome::Missing` returned
/// - any error (IO, bad JSON, wrong shape): the store is left exactly as it was
pub fn load_into<R: SnapshotRepository>(
    store: &mut InventoryStore,
    repo: &R,
) -> Result<LoadOutcome, PersistenceError> {
    let loaded = repo.load().inspect_err(|e| {
        tracing::error!(location = %repo.location(), error = %e, "failed to load inventory");
    })?;

    match loaded {
        Some(levels) => {
            let items = levels.len();
            store.replace(levels);
            tracing::info!(location = %repo.location(), items, "inventory loaded");
            Ok(LoadOutcome::Loaded { items })
        }
        None => {
            store.clear();
            tracing::warn!(location = %repo.location(), "no snapshot found; starting empty");
            Ok(LoadOutcome::Missing)
        }
    }
}

pub(crate) fn encode(levels: &StockLevels) -> Result<Vec<u8>, PersistenceError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    levels
        .serialize(&mut ser)
        .map_err(PersistenceError::Serialize)?;
    Ok(buf)
}

pub(crate) fn decode(location: &str, bytes: &[u8]) -> Result<StockLevels, PersistenceError> {
    use serde_json::error::Category;

    serde_json::from_slice::<StockLevels>(bytes).map_err(|source| {
        let location = location.to_string();
        match source.classify() {
            Category::Data => PersistenceError::InvalidShape { location, source },
            Category::Io => PersistenceError::Io {
                location,
                source: source.into(),
            },
            Category::Syntax | Category::Eof => PersistenceError::Corrupted { location, source },
        }
    })
}
