//! Duplicate check results

use crate::types::{RecordOrigin, ResourceRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which check confirmed a duplicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateType {
    UrlExact,
    RepositoryMatch,
    NameSimilar,
    DescriptionSimilar,
}

impl DuplicateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UrlExact => "url_exact",
            Self::RepositoryMatch => "repository_match",
            Self::NameSimilar => "name_similar",
            Self::DescriptionSimilar => "description_similar",
        }
    }
}

impl fmt::Display for DuplicateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference record's name and its similarity to the candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarMatch {
    pub name: String,
    pub score: f64,
}

/// Outcome of one check.
///
/// `passed` is false whenever the check found anything: a direct match
/// (`matched`) or similar records above the collect threshold (`similar`).
/// A failed check does not by itself make the candidate a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub similar: Vec<SimilarMatch>,
}

impl CheckOutcome {
    /// Nothing found (or nothing to compare)
    pub fn pass() -> Self {
        Self {
            passed: true,
            matched: None,
            similar: Vec::new(),
        }
    }

    /// Direct match against the named record
    pub fn matched(name: impl Into<String>) -> Self {
        Self {
            passed: false,
            matched: Some(name.into()),
            similar: Vec::new(),
        }
    }

    /// Similarity evidence; passes only when there is none
    pub fn with_evidence(similar: Vec<SimilarMatch>) -> Self {
        Self {
            passed: similar.is_empty(),
            matched: None,
            similar,
        }
    }
}

/// Per-check breakdown. A check that never ran (an earlier check confirmed
/// the duplicate) is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<CheckOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<CheckOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<CheckOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CheckOutcome>,
}

/// Verdict for one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateCheckResult {
    pub resource_id: String,
    pub resource_name: String,
    pub resource_url: String,
    pub is_duplicate: bool,
    pub duplicate_type: Option<DuplicateType>,
    pub matched_resource: Option<ResourceRecord>,
    pub matched_origin: Option<RecordOrigin>,
    /// 1.0 for URL and repository matches, the best score for similarity
    /// matches, 0.0 when not a duplicate
    pub similarity_score: f64,
    pub checks: Checks,
}

impl DuplicateCheckResult {
    /// Non-duplicate result for `candidate` with no checks recorded yet
    pub fn for_candidate(candidate: &ResourceRecord) -> Self {
        Self {
            resource_id: candidate.id.clone(),
            resource_name: candidate.display_name.clone(),
            resource_url: candidate.primary_link.clone(),
            is_duplicate: false,
            duplicate_type: None,
            matched_resource: None,
            matched_origin: None,
            similarity_score: 0.0,
            checks: Checks::default(),
        }
    }

    pub(crate) fn confirm(
        mut self,
        kind: DuplicateType,
        matched: &ResourceRecord,
        origin: RecordOrigin,
        score: f64,
    ) -> Self {
        self.is_duplicate = true;
        self.duplicate_type = Some(kind);
        self.matched_resource = Some(matched.clone());
        self.matched_origin = Some(origin);
        self.similarity_score = score;
        self
    }

    /// Display name of the matched record
    pub fn matched_name(&self) -> Option<&str> {
        self.matched_resource
            .as_ref()
            .map(|r| r.display_name.as_str())
    }

    /// Near-miss evidence on a non-duplicate, as `(check, match)` pairs
    pub fn advisory_matches(&self) -> Vec<(&'static str, &SimilarMatch)> {
        if self.is_duplicate {
            return Vec::new();
        }
        let mut out = Vec::new();
        for (label, outcome) in [("name", &self.checks.name), ("description", &self.checks.description)] {
            if let Some(outcome) = outcome {
                out.extend(outcome.similar.iter().map(|m| (label, m)));
            }
        }
        out
    }

    /// Non-duplicate whose name or description check still found something
    pub fn is_advisory(&self) -> bool {
        !self.is_duplicate
            && [&self.checks.name, &self.checks.description]
                .into_iter()
                .flatten()
                .any(|outcome| !outcome.passed)
    }
}

/// Counts over a batch of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub checked: usize,
    pub duplicates: usize,
    pub passed: usize,
    pub advisory: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[DuplicateCheckResult]) -> Self {
        let duplicates = results.iter().filter(|r| r.is_duplicate).count();
        Self {
            checked: results.len(),
            duplicates,
            passed: results.len() - duplicates,
            advisory: results.iter().filter(|r| r.is_advisory()).count(),
        }
    }
}
