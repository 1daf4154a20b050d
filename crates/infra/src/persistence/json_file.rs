use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use stockroom_inventory::StockLevels;

use super::{PersistenceError, SnapshotRepository, decode, encode};

/// Snapshot stored as a JSON file on the local filesystem.
///
/// The file is opened for the duration of a single `save`/`load` call and
/// closed before the call returns, on success and on failure alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            location: self.location(),
            source,
        }
    }
}

impl SnapshotRepository for JsonFileRepository {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn save(&self, levels: &StockLevels) -> Result<(), PersistenceError> {
        let bytes = encode(levels)?;

        let mut file = fs::File::create(&self.path).map_err(|e| self.io_error(e))?;
        file.write_all(&bytes).map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }

    fn load(&self) -> Result<Option<StockLevels>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        decode(&self.location(), &bytes).map(Some)
    }
}
