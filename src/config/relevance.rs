//! Relevance scoring and category configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bonus awarded when the external signal (upvotes, stars) reaches `min`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalBand {
    pub min: i64,
    pub bonus: u32,
}

impl SignalBand {
    pub fn new(min: i64, bonus: u32) -> Self {
        Self { min, bonus }
    }
}

/// Keyword-weighted relevance scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceConfig {
    /// High-value keywords (exact product mentions)
    pub high_keywords: Vec<String>,
    /// Points per matched high-value keyword
    pub high_weight: u32,
    /// Medium-value keywords (generic ecosystem terms)
    pub medium_keywords: Vec<String>,
    /// Points per matched medium-value keyword
    pub medium_weight: u32,
    /// Hosts that count as repository hosting
    pub repository_hosts: Vec<String>,
    /// Flat bonus for repository-hosting URLs
    pub repository_bonus: u32,
    /// Upper bound of the score
    pub max_score: u32,
    /// Candidates below this score are dropped when ranking
    pub min_score: u32,
    /// External signal bands, highest first; the first band reached applies
    pub signal_bands: Vec<SignalBand>,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            high_keywords: vec![
                "claude code".to_string(),
                "claude-code".to_string(),
                "anthropic".to_string(),
                "mcp server".to_string(),
                "model context protocol".to_string(),
            ],
            high_weight: 25,
            medium_keywords: vec![
                "claude".to_string(),
                "mcp".to_string(),
                "llm tool".to_string(),
                "ai assistant".to_string(),
                "ai coding".to_string(),
            ],
            medium_weight: 15,
            repository_hosts: vec!["github.com".to_string()],
            repository_bonus: 10,
            max_score: 100,
            min_score: 20,
            signal_bands: vec![
                SignalBand::new(100, 20),
                SignalBand::new(50, 15),
                SignalBand::new(20, 10),
                SignalBand::new(10, 5),
            ],
        }
    }
}

/// Keyword rule mapping text to a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    fn new(category: &str, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Category table: id prefixes and inference rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Prefix used for unknown categories
    pub default_prefix: String,
    /// Category used when no rule matches
    pub default_category: String,
    /// Category id -> resource id prefix
    pub prefixes: BTreeMap<String, String>,
    /// Rules evaluated in order; the first rule with a matching keyword wins
    pub rules: Vec<CategoryRule>,
}

impl CategoryConfig {
    /// Resource id prefix for a category
    pub fn prefix_for(&self, category: &str) -> &str {
        self.prefixes
            .get(category)
            .map(|p| p.as_str())
            .unwrap_or(&self.default_prefix)
    }
}

impl Default for CategoryConfig {
    fn default() -> Self {
        let prefixes = [
            ("official-resources", "of"),
            ("skills", "skill"),
            ("workflows", "w"),
            ("tooling", "tool"),
            ("statusline", "status"),
            ("hooks", "hook"),
            ("slash-commands", "cmd"),
            ("claude-md-files", "claude"),
            ("alternative-clients", "alt"),
            ("mcp-servers", "mcp"),
            ("open-source-projects", "proj"),
            ("case-studies", "case"),
            ("ecosystem", "eco"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            default_prefix: "res".to_string(),
            default_category: "ecosystem".to_string(),
            prefixes,
            rules: vec![
                CategoryRule::new("mcp-servers", &["mcp", "model context protocol"]),
                CategoryRule::new("hooks", &["hook"]),
                CategoryRule::new("slash-commands", &["slash", "command"]),
                CategoryRule::new("workflows", &["workflow", "guide"]),
                CategoryRule::new("tooling", &["tool", "extension", "plugin"]),
                CategoryRule::new("skills", &["skill"]),
                CategoryRule::new("statusline", &["status", "statusline"]),
                CategoryRule::new("claude-md-files", &["claude.md"]),
                CategoryRule::new("alternative-clients", &["client", "terminal", "cli"]),
            ],
        }
    }
}
