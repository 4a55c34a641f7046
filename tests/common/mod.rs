//! Common test utilities for corkboard integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's `~/.local/share/corkboard/` directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with isolated data storage.
///
/// The `cork()` method returns a `Command` that sets `CORK_DATA_DIR`
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with an isolated data directory.
    pub fn new() -> Self {
        Self {
            data_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the cork binary with an isolated data directory.
    pub fn cork(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_cork"));
        cmd.env("CORK_DATA_DIR", self.data_dir.path());
        cmd
    }

    /// Run a command with `--json` and parse its stdout.
    pub fn cork_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .cork()
            .arg("--json")
            .args(args)
            .output()
            .expect("command runs");
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is JSON")
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &std::path::Path {
        self.data_dir.path()
    }

    /// Read the persisted snapshot document as JSON.
    pub fn snapshot(&self) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.data_path().join("data.json"))
            .expect("data.json exists");
        serde_json::from_str(&raw).expect("data.json is JSON")
    }

    /// Create a board, a column on it, and a card in it; returns their ids.
    pub fn seed_board(&self) -> (String, String, String) {
        let board = self.cork_json(&["board", "create", "Sprint 1"]);
        let board_id = board["id"].as_str().unwrap().to_string();
        let column = self.cork_json(&["column", "create", &board_id, "To Do"]);
        let column_id = column["id"].as_str().unwrap().to_string();
        let card = self.cork_json(&["card", "create", &column_id, "Write spec"]);
        let card_id = card["id"].as_str().unwrap().to_string();
        (board_id, column_id, card_id)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
