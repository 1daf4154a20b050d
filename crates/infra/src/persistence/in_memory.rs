use std::sync::RwLock;

use stockroom_inventory::StockLevels;

use super::{PersistenceError, SnapshotRepository, decode, encode};

/// In-memory snapshot store for tests/dev.
///
/// Holds the encoded bytes rather than the mapping, so loads go through the
/// same decoding and validation as the file-backed repository.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    inner: RwLock<Option<Vec<u8>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw snapshot bytes (which need not be valid).
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: RwLock::new(Some(bytes.into())),
        }
    }

    /// Current raw snapshot, if any.
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.inner.read().ok()?.clone()
    }
}

impl SnapshotRepository for InMemoryRepository {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn save(&self, levels: &StockLevels) -> Result<(), PersistenceError> {
        let bytes = encode(levels)?;
        if let Ok(mut slot) = self.inner.write() {
            *slot = Some(bytes);
        }
        Ok(())
    }

    fn load(&self) -> Result<Option<StockLevels>, PersistenceError> {
        let raw = match self.inner.read() {
            Ok(slot) => slot.clone(),
            Err(_) => return Ok(None),
        };

        raw.map(|bytes| decode(&self.location(), &bytes)).transpose()
    }
}
