//! Keyword-weighted relevance scoring
//!
//! Used to rank and filter discovered candidates before they are checked for
//! duplicates. The score never feeds into the duplicate verdict.

use crate::config::RelevanceConfig;
use crate::normalize::is_repository_url;
use crate::types::ResourceRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text fields a score is computed from
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceFields<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub url: &'a str,
}

impl<'a> RelevanceFields<'a> {
    pub fn new(name: &'a str, description: &'a str, url: &'a str) -> Self {
        Self {
            name,
            description,
            url,
        }
    }

    /// Name, description (localized fallback) and primary link of a record
    pub fn from_record(record: &'a ResourceRecord) -> Self {
        Self {
            name: &record.display_name,
            description: record.comparable_description(),
            url: &record.primary_link,
        }
    }

    fn combined_lowercase(&self) -> String {
        format!("{} {} {}", self.name, self.description, self.url).to_lowercase()
    }
}

/// Coarse relevance band of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelevanceLevel {
    Direct,
    Indirect,
    Ecosystem,
    Unrelated,
}

impl RelevanceLevel {
    /// >= 50 direct, >= 30 indirect, >= 15 ecosystem, otherwise unrelated
    pub fn from_score(score: u32) -> Self {
        if score >= 50 {
            Self::Direct
        } else if score >= 30 {
            Self::Indirect
        } else if score >= 15 {
            Self::Ecosystem
        } else {
            Self::Unrelated
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Indirect => "indirect",
            Self::Ecosystem => "ecosystem",
            Self::Unrelated => "unrelated",
        }
    }
}

impl fmt::Display for RelevanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score with the reasons behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelevanceAssessment {
    pub score: u32,
    pub level: RelevanceLevel,
    pub matched_keywords: Vec<String>,
    pub repository_bonus: u32,
    pub signal_bonus: u32,
}

/// Relevance scorer over a keyword table
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    config: RelevanceConfig,
}

impl RelevanceScorer {
    pub fn new(config: RelevanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RelevanceConfig {
        &self.config
    }

    /// Score in `[0, max_score]`
    pub fn score(&self, fields: &RelevanceFields<'_>, external_signal: i64) -> u32 {
        self.assess(fields, external_signal).score
    }

    /// Score plus matched keywords and bonuses.
    ///
    /// Each keyword counts once no matter how often it appears. Overlapping
    /// keywords count separately, so "claude code" also earns the "claude"
    /// points.
    pub fn assess(&self, fields: &RelevanceFields<'_>, external_signal: i64) -> RelevanceAssessment {
        let combined = fields.combined_lowercase();
        let mut raw: u32 = 0;
        let mut matched_keywords = Vec::new();

        for (keywords, weight) in [
            (&self.config.high_keywords, self.config.high_weight),
            (&self.config.medium_keywords, self.config.medium_weight),
        ] {
            for keyword in keywords {
                let keyword = keyword.to_lowercase();
                if !keyword.is_empty() && combined.contains(&keyword) {
                    raw = raw.saturating_add(weight);
                    matched_keywords.push(keyword);
                }
            }
        }

        let repository_bonus = if is_repository_url(fields.url, &self.config.repository_hosts) {
            self.config.repository_bonus
        } else {
            0
        };

        let signal_bonus = self.signal_bonus(external_signal);
        raw = raw
            .saturating_add(repository_bonus)
            .saturating_add(signal_bonus);

        let score = raw.min(self.config.max_score);
        RelevanceAssessment {
            score,
            level: RelevanceLevel::from_score(score),
            matched_keywords,
            repository_bonus,
            signal_bonus,
        }
    }

    /// Bonus of the first band the signal reaches (bands are highest first)
    pub fn signal_bonus(&self, external_signal: i64) -> u32 {
        self.config
            .signal_bands
            .iter()
            .find(|band| external_signal >= band.min)
            .map(|band| band.bonus)
            .unwrap_or(0)
    }

    /// Whether a score clears the ranking cut-off
    pub fn passes(&self, score: u32) -> bool {
        score >= self.config.min_score
    }
}

/// Score with the default keyword table
pub fn score_relevance(fields: &RelevanceFields<'_>, external_signal: i64) -> u32 {
    RelevanceScorer::default().score(fields, external_signal)
}
