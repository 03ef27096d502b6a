//! Candidate records from crawler output
//!
//! Crawlers hand over loosely structured findings; the builder turns each
//! one into a pending-queue record with an id, an inferred category, a
//! relevance score and the crawler's metadata kept under `_`-prefixed keys.

use crate::config::{CategoryConfig, Config, RelevanceConfig};
use crate::scoring::{infer_category, RelevanceFields, RelevanceScorer};
use crate::types::{ExtraMetadata, ResourceRecord};
use crate::util::truncate_str;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Longest description kept on a candidate, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Catalog date format
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Status of a freshly discovered candidate
pub const STATUS_PENDING: &str = "pending";

/// Extra-metadata key holding the relevance score
pub const RELEVANCE_SCORE_KEY: &str = "_relevance_score";

/// One finding as reported by a crawler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCandidate {
    pub url: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_url: String,
    /// Upvotes, stars or whatever the source ranks by
    pub source_score: i64,
    /// Source-specific fields, stored with a `_` prefix
    pub extra: ExtraMetadata,
}

impl RawCandidate {
    pub fn new(url: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }
}

/// `{prefix}-{first 8 hex digits of SHA-256(url)}`
pub fn generate_resource_id(prefix: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{}-{}", prefix, &digest[..8])
}

/// Builds pending-queue records for one crawler
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    source_type: String,
    crawler_name: String,
    scorer: RelevanceScorer,
    categories: CategoryConfig,
}

impl CandidateBuilder {
    pub fn new(
        source_type: impl Into<String>,
        crawler_name: impl Into<String>,
        relevance: RelevanceConfig,
        categories: CategoryConfig,
    ) -> Self {
        Self {
            source_type: source_type.into(),
            crawler_name: crawler_name.into(),
            scorer: RelevanceScorer::new(relevance),
            categories,
        }
    }

    /// Builder using the scoring and category tables of `config`
    pub fn from_config(
        source_type: impl Into<String>,
        crawler_name: impl Into<String>,
        config: &Config,
    ) -> Self {
        Self::new(
            source_type,
            crawler_name,
            config.relevance.clone(),
            config.categories.clone(),
        )
    }

    pub fn build(&self, raw: &RawCandidate) -> ResourceRecord {
        self.build_at(raw, Local::now())
    }

    /// Build with an explicit discovery time
    pub fn build_at(&self, raw: &RawCandidate, now: DateTime<Local>) -> ResourceRecord {
        let category = infer_category(&raw.title, &raw.description, &self.categories).to_string();
        let id = generate_resource_id(self.categories.prefix_for(&category), &raw.url);
        let relevance = self
            .scorer
            .score(&RelevanceFields::new(&raw.title, &raw.description, &raw.url), raw.source_score);
        let today = now.format(DATE_FORMAT).to_string();

        let mut extra = ExtraMetadata::new();
        extra.insert("_source".into(), self.source_type.clone().into());
        extra.insert("_source_crawler".into(), self.crawler_name.clone().into());
        extra.insert("_discovered_at".into(), now.to_rfc3339().into());
        extra.insert("_status".into(), STATUS_PENDING.into());
        extra.insert(RELEVANCE_SCORE_KEY.into(), relevance.into());
        extra.insert("_source_score".into(), raw.source_score.into());
        for (key, value) in &raw.extra {
            extra.insert(format!("_{}", key), value.clone());
        }

        ResourceRecord {
            id,
            display_name: raw.title.clone(),
            display_name_localized: raw.title.clone(),
            category,
            subcategory: "general".to_string(),
            primary_link: raw.url.clone(),
            author: raw.author.clone(),
            author_profile: raw.author_url.clone(),
            is_active: true,
            date_added: today.clone(),
            last_modified: today.clone(),
            last_checked: today,
            description: truncate_str(&raw.description, MAX_DESCRIPTION_CHARS),
            is_pinned: false,
            section: "community".to_string(),
            extra,
            ..Default::default()
        }
    }
}

/// Highest-scoring candidates first, dropping those below `min_score`, at
/// most `limit` of them. Equal scores keep their input order.
pub fn rank_candidates(
    mut records: Vec<ResourceRecord>,
    min_score: u32,
    limit: usize,
) -> Vec<ResourceRecord> {
    let score = |r: &ResourceRecord| r.extra_i64(RELEVANCE_SCORE_KEY).unwrap_or(0);
    records.retain(|r| score(r) >= i64::from(min_score));
    records.sort_by_key(|r| std::cmp::Reverse(score(r)));
    records.truncate(limit);
    records
}
