//! Infrastructure layer: snapshot persistence and configuration.

pub mod config;
pub mod persistence;

pub use config::Config;
pub use persistence::{
    InMemoryRepository, JsonFileRepository, LoadOutcome, PersistenceError, SnapshotRepository,
    load_into, save_store,
};
