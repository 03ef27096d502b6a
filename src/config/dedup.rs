//! URL normalization and duplicate detection configuration

use serde::{Deserialize, Serialize};

/// URL normalization steps.
///
/// Every step is independently toggleable and enabled by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Strip a leading `http://` or `https://`
    pub strip_protocol: bool,
    /// Strip a leading `www.`
    pub strip_www: bool,
    /// Strip trailing slashes
    pub strip_trailing_slash: bool,
    /// Lowercase the whole URL
    pub lowercase: bool,
    /// Strip query string and fragment
    pub strip_query: bool,
    /// Strip a trailing `.git`
    pub strip_git_suffix: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            strip_protocol: true,
            strip_www: true,
            strip_trailing_slash: true,
            lowercase: true,
            strip_query: true,
            strip_git_suffix: true,
        }
    }
}

/// Duplicate detection thresholds.
///
/// Name and description checks use two thresholds: matches at or above the
/// collect threshold are reported as evidence, and only the best match at or
/// above the confirm threshold marks the candidate as a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Collect threshold for name similarity
    pub name_similarity_threshold: f64,
    /// Confirm threshold for name similarity
    pub name_confirm_threshold: f64,
    /// Weight of the Jaccard component in name similarity (edit similarity gets the rest)
    pub name_jaccard_weight: f64,
    /// Collect threshold for description similarity
    pub description_similarity_threshold: f64,
    /// Confirm threshold for description similarity
    pub description_confirm_threshold: f64,
    /// Descriptions shorter than this (in characters) are never compared
    pub min_description_length: usize,
    /// Maximum number of description matches kept
    pub description_max_matches: usize,
    /// Number of similar entries reported as evidence per check
    pub evidence_limit: usize,
    /// Leading words of the candidate name used to narrow the name search
    pub name_prefix_words: usize,
    /// Below this many narrowed candidates, the name search scans every record
    pub min_bucket_candidates: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            name_similarity_threshold: 0.85,
            name_confirm_threshold: 0.95,
            name_jaccard_weight: 0.4,
            description_similarity_threshold: 0.80,
            description_confirm_threshold: 0.95,
            min_description_length: 20,
            description_max_matches: 5,
            evidence_limit: 3,
            name_prefix_words: 3,
            min_bucket_candidates: 10,
        }
    }
}
