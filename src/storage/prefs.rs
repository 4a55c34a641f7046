//! Local UI preferences.
//!
//! Preferences are a small key-value document (`prefs.json`) persisted
//! independently of the entity snapshot; they sit outside the store's
//! integrity rules and survive a `delete all`.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// UI preferences persisted next to, but independent of, the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prefs {
    /// Accent colour as a hex string (e.g., "#e74c3c")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_colour: Option<String>,
}

impl Prefs {
    fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("prefs.json")
    }

    /// Load preferences, defaulting to empty on any read or parse failure.
    pub fn load(data_dir: &Path) -> Self {
        match fs::read_to_string(Self::path(data_dir)) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist preferences to the data directory.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(data_dir), json)?;
        Ok(())
    }
}
