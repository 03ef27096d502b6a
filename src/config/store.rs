//! Catalog and queue file locations

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Locations of the catalog CSV and the candidate queues
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Repository root the other paths are relative to
    pub root: PathBuf,
    /// Published catalog (CSV)
    pub catalog: PathBuf,
    /// Pending review queue (JSON)
    pub pending: PathBuf,
    /// Rejected candidates (JSON)
    pub rejected: PathBuf,
}

impl StoreConfig {
    pub fn catalog_path(&self) -> PathBuf {
        self.resolve(&self.catalog)
    }

    pub fn pending_path(&self) -> PathBuf {
        self.resolve(&self.pending)
    }

    pub fn rejected_path(&self) -> PathBuf {
        self.resolve(&self.rejected)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            catalog: PathBuf::from("THE_RESOURCES_TABLE.csv"),
            pending: PathBuf::from("candidates/pending_resources.json"),
            rejected: PathBuf::from("candidates/rejected_resources.json"),
        }
    }
}
