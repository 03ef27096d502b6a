//! Configuration for the curation pipeline
//!
//! Everything tunable lives in one TOML document. Every table and every key
//! has a default, so a partial (or absent) file is always usable.

mod dedup;
mod logging;
mod relevance;
mod store;

pub use dedup::{DedupConfig, NormalizeConfig};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use relevance::{CategoryConfig, CategoryRule, RelevanceConfig, SignalBand};
pub use store::StoreConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "curation.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// URL normalization steps
    #[serde(default)]
    pub normalize: NormalizeConfig,
    /// Duplicate detection thresholds
    #[serde(default)]
    pub dedup: DedupConfig,
    /// Relevance scoring tables
    #[serde(default)]
    pub relevance: RelevanceConfig,
    /// Category prefixes and inference rules
    #[serde(default)]
    pub categories: CategoryConfig,
    /// Catalog and queue locations
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Render as TOML (used by `init`).
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Validate all configuration fields.
    ///
    /// Collects every problem and reports them together.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        let d = &self.dedup;
        for (name, value) in [
            ("name_similarity_threshold", d.name_similarity_threshold),
            ("name_confirm_threshold", d.name_confirm_threshold),
            ("name_jaccard_weight", d.name_jaccard_weight),
            ("description_similarity_threshold", d.description_similarity_threshold),
            ("description_confirm_threshold", d.description_confirm_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!("{} must be between 0.0 and 1.0, got {}", name, value));
            }
        }
        if d.name_confirm_threshold < d.name_similarity_threshold {
            errors.push(
                "name_confirm_threshold must not be below name_similarity_threshold".to_string(),
            );
        }
        if d.description_confirm_threshold < d.description_similarity_threshold {
            errors.push(
                "description_confirm_threshold must not be below description_similarity_threshold"
                    .to_string(),
            );
        }
        if d.description_max_matches == 0 {
            errors.push("description_max_matches must be positive".to_string());
        }

        let r = &self.relevance;
        if r.max_score == 0 {
            errors.push("relevance max_score must be positive".to_string());
        }
        if r.min_score > r.max_score {
            errors.push(format!(
                "relevance min_score ({}) must not exceed max_score ({})",
                r.min_score, r.max_score
            ));
        }
        if !r.high_keywords.is_empty() && r.high_weight == 0 {
            errors.push("relevance high_weight must be positive when high_keywords are set".to_string());
        }
        if !r.medium_keywords.is_empty() && r.medium_weight == 0 {
            errors.push(
                "relevance medium_weight must be positive when medium_keywords are set".to_string(),
            );
        }
        if r.signal_bands.windows(2).any(|w| w[0].min < w[1].min) {
            errors.push("relevance signal_bands must be ordered highest first".to_string());
        }

        let c = &self.categories;
        if c.default_prefix.is_empty() {
            errors.push("categories default_prefix must not be empty".to_string());
        }
        if c.default_category.is_empty() {
            errors.push("categories default_category must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}
