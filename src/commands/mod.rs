//! CLI command implementations

mod check;
mod init;
mod score;
mod stats;

pub use check::{check_candidate, check_name, check_pending, check_url};
pub use init::init_config;
pub use score::score_candidate;
pub use stats::show_stats;

use anyhow::{Context, Result};
use clap::ValueEnum;
use curate::{config::Config, store::CurationStore, DuplicateDetector};
use tracing::info;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Load the store and build a detector over catalog + rejected records
fn load_detector(config: &Config) -> Result<(CurationStore, DuplicateDetector)> {
    let store = CurationStore::load(&config.store).with_context(|| {
        format!(
            "Failed to load curation data under {}",
            config.store.root.display()
        )
    })?;
    info!(
        "Loaded {} catalog, {} pending, {} rejected resources",
        store.catalog.len(),
        store.pending.len(),
        store.rejected.len()
    );

    let index = store.build_index(&config.normalize);
    let detector = DuplicateDetector::new(index, config.dedup.clone());
    Ok((store, detector))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}
