//! Read-only loaders for the catalog CSV and the candidate queues
//!
//! A missing file is an empty set (a fresh checkout has no rejected queue
//! yet). A file that exists but cannot be parsed is an error. Individual
//! entries that do not fit the record shape are skipped with a warning.

use crate::config::{NormalizeConfig, StoreConfig};
use crate::index::ResourceIndex;
use crate::types::ResourceRecord;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors loading catalog or queue files
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid CSV in {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Queue file layout: `{"_comment": ..., "_schema_version": ..., "resources": [...]}`
#[derive(Debug, Deserialize)]
struct QueueFile {
    #[serde(default)]
    resources: Vec<serde_json::Value>,
}

/// Load catalog records from a CSV file with a header row.
pub fn load_catalog(path: &Path) -> Result<Vec<ResourceRecord>, StoreError> {
    if !path.exists() {
        debug!("Catalog {} not found, treating as empty", path.display());
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| StoreError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<HashMap<String, String>>().enumerate() {
        let fields = match result {
            Ok(fields) => fields,
            Err(e) => {
                warn!("Skipping catalog row {} in {}: {}", row + 2, path.display(), e);
                continue;
            }
        };

        let object: serde_json::Map<String, serde_json::Value> = fields
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        match serde_json::from_value::<ResourceRecord>(serde_json::Value::Object(object)) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping catalog row {} in {}: {}", row + 2, path.display(), e),
        }
    }

    debug!("Loaded {} catalog records from {}", records.len(), path.display());
    Ok(records)
}

/// Load queue records from a JSON file with a top-level `resources` array.
pub fn load_queue(path: &Path) -> Result<Vec<ResourceRecord>, StoreError> {
    if !path.exists() {
        debug!("Queue {} not found, treating as empty", path.display());
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let queue: QueueFile = serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::with_capacity(queue.resources.len());
    for (i, value) in queue.resources.into_iter().enumerate() {
        match serde_json::from_value::<ResourceRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping queue entry {} in {}: {}", i, path.display(), e),
        }
    }

    debug!("Loaded {} queue records from {}", records.len(), path.display());
    Ok(records)
}

/// Catalog, pending queue and rejected set as loaded from disk
#[derive(Debug, Clone, Default)]
pub struct CurationStore {
    pub catalog: Vec<ResourceRecord>,
    pub pending: Vec<ResourceRecord>,
    pub rejected: Vec<ResourceRecord>,
}

impl CurationStore {
    pub fn load(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self {
            catalog: load_catalog(&config.catalog_path())?,
            pending: load_queue(&config.pending_path())?,
            rejected: load_queue(&config.rejected_path())?,
        })
    }

    /// Reference index over catalog and rejected records
    pub fn build_index(&self, options: &NormalizeConfig) -> ResourceIndex {
        ResourceIndex::build(self.catalog.clone(), self.rejected.clone(), options)
    }
}
