//! Corkboard - a single-user desktop kanban board core.
//!
//! This library provides the board data model behind the `cork` CLI tool:
//! the entity store with its cascading-delete rules, the drag-and-drop
//! reorder engine, the view synchronizer, and the snapshot persistence
//! gateway.

pub mod cli;
pub mod commands;
pub mod controllers;
pub mod models;
pub mod reorder;
pub mod shell;
pub mod storage;
pub mod store;
pub mod view;

/// Test utilities for isolated test environments.
#[cfg(test)]
pub(crate) mod test_utils {
    use std::path::Path;
    use tempfile::TempDir;

    use crate::storage::{FileGateway, MemoryGateway};
    use crate::store::EntityStore;

    /// Test environment with an isolated data directory.
    ///
    /// Library tests use dependency injection (`FileGateway::with_data_dir`)
    /// rather than the `CORK_DATA_DIR` env var so they stay parallel-safe.
    pub struct TestEnv {
        /// Isolated data storage directory
        pub data_dir: TempDir,
    }

    impl TestEnv {
        /// Create a new test environment with an isolated directory.
        pub fn new() -> Self {
            Self {
                data_dir: TempDir::new().unwrap(),
            }
        }

        /// Get the path to the isolated data directory.
        pub fn data_path(&self) -> &Path {
            self.data_dir.path()
        }

        /// Open a store backed by a file gateway in this environment.
        pub fn open_store(&self) -> crate::store::EntityStore {
            EntityStore::load(Box::new(FileGateway::with_data_dir(self.data_path())))
        }
    }

    impl Default for TestEnv {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Open a store backed by an in-memory gateway, for tests that never
    /// reopen the data from disk.
    pub fn memory_store() -> EntityStore {
        EntityStore::load(Box::new(MemoryGateway::new()))
    }
}

/// Library-level error type for corkboard operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for corkboard operations.
pub type Result<T> = std::result::Result<T, Error>;
