//! Snapshot persistence for corkboard data.
//!
//! The entire entity state is persisted as one JSON document (`data.json`)
//! in the corkboard data directory. Writes are full-snapshot overwrites:
//! a save either completes or the file on disk remains the prior
//! successful write; no partial write is ever observed by a load.
//!
//! UI preferences that sit outside the snapshot's integrity rules live in
//! [`prefs`].

pub mod prefs;

pub use prefs::Prefs;

use crate::models::Snapshot;
use crate::{Error, Result};
use std::cell::{Cell, RefCell};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::NamedTempFile;

/// Environment variable overriding the data directory (used by tests and
/// the CLI's `--data-dir` flag).
pub const DATA_DIR_ENV: &str = "CORK_DATA_DIR";

/// Trait for gateways that persist the full entity snapshot.
///
/// The store calls `save` exactly once per mutating operation, before
/// control returns to the caller.
pub trait SnapshotGateway {
    /// Load the persisted snapshot.
    ///
    /// Any read or parse failure degrades to the empty default snapshot;
    /// load never fails.
    fn load(&self) -> Snapshot;

    /// Overwrite the persisted snapshot atomically.
    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Storage location description (for display purposes).
    fn location(&self) -> String;
}

/// Resolve the corkboard data directory.
///
/// Priority: `CORK_DATA_DIR` env var > platform data dir (e.g.
/// `~/.local/share/corkboard/`).
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|d| d.join("corkboard"))
        .ok_or_else(|| Error::Other("could not determine a data directory".to_string()))
}

/// File-backed snapshot gateway writing `data.json` in the data directory.
pub struct FileGateway {
    data_dir: PathBuf,
}

impl FileGateway {
    /// Create a gateway rooted at the resolved data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::with_data_dir(resolve_data_dir()?))
    }

    /// Create a gateway rooted at an explicit directory (dependency
    /// injection for tests).
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the snapshot document.
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join("data.json")
    }
}

impl SnapshotGateway for FileGateway {
    fn load(&self) -> Snapshot {
        match fs::read_to_string(self.data_path()) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => Snapshot::default(),
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string_pretty(snapshot)?;

        // Write to a temp file in the same directory, then rename over the
        // destination so a concurrent load never sees a partial document.
        let mut tmp = NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.data_path())
            .map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    fn location(&self) -> String {
        self.data_path().display().to_string()
    }
}

/// In-memory snapshot gateway for tests.
///
/// Clones share the same underlying snapshot, so a test can keep a handle
/// while the store owns its own copy.
#[derive(Clone, Default)]
pub struct MemoryGateway {
    snapshot: Rc<RefCell<Snapshot>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryGateway {
    /// Create an empty in-memory gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves performed so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// The most recently saved snapshot.
    pub fn saved(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }
}

impl SnapshotGateway for MemoryGateway {
    fn load(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        *self.snapshot.borrow_mut() = snapshot.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Board, generate_id};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_defaults_empty() {
        let dir = TempDir::new().unwrap();
        let gateway = FileGateway::with_data_dir(dir.path());
        let snapshot = gateway.load();
        assert!(snapshot.boards.is_empty());
        assert!(snapshot.labels.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_defaults_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("data.json"), "{not json").unwrap();
        let gateway = FileGateway::with_data_dir(dir.path());
        let snapshot = gateway.load();
        assert!(snapshot.boards.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut gateway = FileGateway::with_data_dir(dir.path());

        let mut snapshot = Snapshot::default();
        snapshot
            .boards
            .push(Board::new(generate_id("board"), "Sprint 1".to_string()));
        gateway.save(&snapshot).unwrap();

        let loaded = gateway.load();
        assert_eq!(loaded.boards.len(), 1);
        assert_eq!(loaded.boards[0].name, "Sprint 1");
    }

    #[test]
    fn test_save_load_twice_byte_identical() {
        let dir = TempDir::new().unwrap();
        let mut gateway = FileGateway::with_data_dir(dir.path());

        let mut snapshot = Snapshot::default();
        snapshot
            .boards
            .push(Board::new(generate_id("board"), "Sprint 1".to_string()));
        gateway.save(&snapshot).unwrap();

        let first = std::fs::read(gateway.data_path()).unwrap();
        let loaded = gateway.load();
        gateway.save(&loaded).unwrap();
        let second = std::fs::read(gateway.data_path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_save_leaves_no_stray_temp_files() {
        let dir = TempDir::new().unwrap();
        let mut gateway = FileGateway::with_data_dir(dir.path());
        gateway.save(&Snapshot::default()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("data.json")]);
    }

    #[test]
    fn test_memory_gateway_counts_saves() {
        let gateway = MemoryGateway::new();
        let mut handle = gateway.clone();
        handle.save(&Snapshot::default()).unwrap();
        handle.save(&Snapshot::default()).unwrap();
        assert_eq!(gateway.save_count(), 2);
    }
}
