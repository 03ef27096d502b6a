//! Duplicate detector
//!
//! Four checks run in a fixed order and the first confirmed match wins:
//!
//! 1. exact normalized URL
//! 2. repository identity
//! 3. name similarity
//! 4. description similarity
//!
//! The similarity checks collect everything above a loose threshold as
//! evidence and only confirm a duplicate above a strict one, so near misses
//! reach a reviewer instead of being dropped or auto-rejected.

use super::result::{BatchSummary, CheckOutcome, DuplicateCheckResult, DuplicateType, SimilarMatch};
use crate::config::DedupConfig;
use crate::index::{IndexedRecord, ResourceIndex};
use crate::similarity::{jaccard_similarity, weighted_name_similarity};
use crate::types::ResourceRecord;
use tracing::{debug, info};

/// Checks candidates against a reference index
#[derive(Debug, Clone)]
pub struct DuplicateDetector {
    index: ResourceIndex,
    config: DedupConfig,
}

impl DuplicateDetector {
    pub fn new(index: ResourceIndex, config: DedupConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &ResourceIndex {
        &self.index
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Classify one candidate
    pub fn check(&self, candidate: &ResourceRecord) -> DuplicateCheckResult {
        check_duplicate(&self.index, candidate, &self.config)
    }

    /// Classify a batch in order
    pub fn check_batch(&self, candidates: &[ResourceRecord]) -> Vec<DuplicateCheckResult> {
        let results: Vec<DuplicateCheckResult> =
            candidates.iter().map(|c| self.check(c)).collect();

        let summary = BatchSummary::from_results(&results);
        info!(
            "Checked {} candidates: {} duplicates, {} passed ({} with near matches)",
            summary.checked, summary.duplicates, summary.passed, summary.advisory
        );
        results
    }

    /// Records whose name scores at or above the collect threshold, best first
    pub fn similar_names(&self, name: &str) -> Vec<(&IndexedRecord, f64)> {
        name_matches(&self.index, name, &self.config)
    }

    /// Records whose description scores at or above the collect threshold,
    /// best first, at most `description_max_matches`
    pub fn similar_descriptions(&self, description: &str) -> Vec<(&IndexedRecord, f64)> {
        description_matches(&self.index, description, &self.config)
    }
}

/// Classify `candidate` against `index`.
///
/// Never fails: blank fields make the corresponding check pass with no
/// evidence, and an empty index never reports a duplicate.
pub fn check_duplicate(
    index: &ResourceIndex,
    candidate: &ResourceRecord,
    config: &DedupConfig,
) -> DuplicateCheckResult {
    let mut result = DuplicateCheckResult::for_candidate(candidate);
    let url = candidate.primary_link.trim();

    // 1. exact URL
    match index.lookup_url(url) {
        Some(hit) => {
            result.checks.url = Some(CheckOutcome::matched(&hit.record.display_name));
            return finish(result.confirm(DuplicateType::UrlExact, &hit.record, hit.origin, 1.0));
        }
        None => result.checks.url = Some(CheckOutcome::pass()),
    }

    // 2. repository identity
    match index.lookup_repo(url) {
        Some(hit) => {
            result.checks.repository = Some(CheckOutcome::matched(&hit.record.display_name));
            return finish(result.confirm(
                DuplicateType::RepositoryMatch,
                &hit.record,
                hit.origin,
                1.0,
            ));
        }
        None => result.checks.repository = Some(CheckOutcome::pass()),
    }

    // 3. name
    let names = name_matches(index, &candidate.display_name, config);
    result.checks.name = Some(similarity_outcome(&names, config.evidence_limit));
    if let Some(&(best, score)) = names.first() {
        if score >= config.name_confirm_threshold {
            return finish(result.confirm(DuplicateType::NameSimilar, &best.record, best.origin, score));
        }
    }

    // 4. description
    let descriptions = description_matches(index, candidate.comparable_description(), config);
    result.checks.description = Some(similarity_outcome(&descriptions, config.evidence_limit));
    if let Some(&(best, score)) = descriptions.first() {
        if score >= config.description_confirm_threshold {
            return finish(result.confirm(
                DuplicateType::DescriptionSimilar,
                &best.record,
                best.origin,
                score,
            ));
        }
    }

    finish(result)
}

fn finish(result: DuplicateCheckResult) -> DuplicateCheckResult {
    match (&result.duplicate_type, result.matched_name()) {
        (Some(kind), Some(matched)) => debug!(
            "'{}' is a duplicate ({}) of '{}' [{:.2}]",
            result.resource_name, kind, matched, result.similarity_score
        ),
        _ if result.is_advisory() => debug!(
            "'{}' passed with {} near matches",
            result.resource_name,
            result.advisory_matches().len()
        ),
        _ => debug!("'{}' passed", result.resource_name),
    }
    result
}

/// Fails on any collected match, even when `limit` leaves no evidence to show
fn similarity_outcome(matches: &[(&IndexedRecord, f64)], limit: usize) -> CheckOutcome {
    let similar = matches
        .iter()
        .take(limit)
        .map(|(entry, score)| SimilarMatch {
            name: entry.record.display_name.clone(),
            score: *score,
        })
        .collect();
    CheckOutcome {
        passed: matches.is_empty(),
        matched: None,
        similar,
    }
}

fn name_matches<'a>(
    index: &'a ResourceIndex,
    name: &str,
    config: &DedupConfig,
) -> Vec<(&'a IndexedRecord, f64)> {
    if name.trim().is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(&IndexedRecord, f64)> = index
        .name_candidates_with(name, config.name_prefix_words, config.min_bucket_candidates)
        .into_iter()
        .filter_map(|entry| {
            let score =
                weighted_name_similarity(name, &entry.record.display_name, config.name_jaccard_weight);
            (score >= config.name_similarity_threshold).then_some((entry, score))
        })
        .collect();

    // stable: equal scores keep index order
    matches.sort_by(|a, b| b.1.total_cmp(&a.1));
    matches
}

fn description_matches<'a>(
    index: &'a ResourceIndex,
    description: &str,
    config: &DedupConfig,
) -> Vec<(&'a IndexedRecord, f64)> {
    if description.chars().count() < config.min_description_length {
        return Vec::new();
    }

    let mut matches: Vec<(&IndexedRecord, f64)> = index
        .records()
        .iter()
        .filter_map(|entry| {
            let existing = entry.record.comparable_description();
            if existing.is_empty() {
                return None;
            }
            let score = jaccard_similarity(description, existing);
            (score >= config.description_similarity_threshold).then_some((entry, score))
        })
        .collect();

    matches.sort_by(|a, b| b.1.total_cmp(&a.1));
    matches.truncate(config.description_max_matches);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizeConfig;
    use crate::types::RecordOrigin;

    fn detector(existing: Vec<ResourceRecord>, rejected: Vec<ResourceRecord>) -> DuplicateDetector {
        let index = ResourceIndex::build(existing, rejected, &NormalizeConfig::default());
        DuplicateDetector::new(index, DedupConfig::default())
    }

    fn record(name: &str, link: &str) -> ResourceRecord {
        ResourceRecord::new(name, link)
    }

    #[test]
    fn test_exact_url_match() {
        let d = detector(vec![record("Tool", "https://github.com/a/b").with_id("tool-1")], vec![]);
        let result = d.check(&record("Something Else", "https://GITHUB.COM/a/b/"));
        assert!(result.is_duplicate);
        assert_eq!(result.duplicate_type, Some(DuplicateType::UrlExact));
        assert_eq!(result.similarity_score, 1.0);
        assert_eq!(result.matched_resource.as_ref().unwrap().id, "tool-1");
        assert_eq!(result.matched_origin, Some(RecordOrigin::Catalog));
        assert_eq!(result.checks.url.as_ref().unwrap().matched.as_deref(), Some("Tool"));
        assert!(result.checks.repository.is_none());
        assert!(result.checks.name.is_none());
    }

    #[test]
    fn test_git_suffix_is_a_url_match_by_default() {
        let d = detector(vec![record("Tool", "https://github.com/a/b")], vec![]);
        let result = d.check(&record("Other", "https://github.com/a/b.git"));
        assert_eq!(result.duplicate_type, Some(DuplicateType::UrlExact));
    }

    #[test]
    fn test_git_suffix_falls_through_to_repository_match() {
        let options = NormalizeConfig {
            strip_git_suffix: false,
            ..Default::default()
        };
        let index = ResourceIndex::build(vec![record("Tool", "https://github.com/a/b")], vec![], &options);
        let d = DuplicateDetector::new(index, DedupConfig::default());
        let result = d.check(&record("Other", "https://github.com/a/b.git"));
        assert!(result.is_duplicate);
        assert_eq!(result.duplicate_type, Some(DuplicateType::RepositoryMatch));
        assert!(result.checks.url.as_ref().unwrap().passed);
        assert!(!result.checks.repository.as_ref().unwrap().passed);
    }

    #[test]
    fn test_repository_match_on_subpath() {
        let d = detector(vec![], vec![record("Old Tool", "https://github.com/Owner/Repo")]);
        let result = d.check(&record("New", "https://github.com/owner/repo/tree/main"));
        assert_eq!(result.duplicate_type, Some(DuplicateType::RepositoryMatch));
        assert_eq!(result.matched_origin, Some(RecordOrigin::Rejected));
        assert_eq!(result.similarity_score, 1.0);
    }

    #[test]
    fn test_confirmed_name_match() {
        let d = detector(vec![record("Claude Code Helper", "https://a.dev")], vec![]);
        let result = d.check(&record("claude code helper ", "https://b.dev"));
        assert!(result.is_duplicate);
        assert_eq!(result.duplicate_type, Some(DuplicateType::NameSimilar));
        assert_eq!(result.similarity_score, 1.0);
        assert!(result.checks.description.is_none());
    }

    #[test]
    fn test_advisory_name_match_is_not_a_duplicate() {
        let d = detector(vec![record("Claude-Code-Helper!!", "https://a.dev")], vec![]);
        let result = d.check(&record("Claude Code Helper", "https://b.dev"));
        assert!(!result.is_duplicate);
        assert_eq!(result.similarity_score, 0.0);
        let name = result.checks.name.as_ref().unwrap();
        assert!(!name.passed);
        assert_eq!(name.similar.len(), 1);
        assert!((name.similar[0].score - 0.88).abs() < 1e-9);
        assert!(result.is_advisory());
    }

    #[test]
    fn test_helper_tool_pair_is_below_collect_threshold() {
        let d = detector(vec![record("Claude Code Helper Tool", "https://a.dev")], vec![]);
        let result = d.check(&record("Claude Code Helper", "https://b.dev"));
        assert!(!result.is_duplicate);
        assert!(result.checks.name.as_ref().unwrap().passed);
    }

    #[test]
    fn test_name_evidence_is_sorted_and_capped() {
        let existing = vec![
            record("Claude-Code-Helper!!", "https://1.dev"),
            record("Claude Code Helper!", "https://2.dev"),
            record("Claude-Code-Helper!", "https://3.dev"),
            record("Claude Code-Helper!!", "https://4.dev"),
        ];
        let d = detector(existing, vec![]);
        let matches = d.similar_names("Claude Code Helpers");
        assert!(matches.windows(2).all(|w| w[0].1 >= w[1].1));

        let result = d.check(&record("Claude Code Helpers", "https://x.dev"));
        let name = result.checks.name.as_ref().unwrap();
        assert!(name.similar.len() <= 3);
    }

    #[test]
    fn test_narrowed_name_search_agrees_with_full_scan() {
        let mut existing: Vec<ResourceRecord> = (0..15)
            .map(|i| record(&format!("Claude Plugin {}", i), &format!("https://p{}.dev", i)))
            .collect();
        existing.push(record("Claude Plugin 3!", "https://dup.dev"));
        let index = ResourceIndex::build(existing, vec![], &NormalizeConfig::default());

        let narrowed = DedupConfig::default();
        let full_scan = DedupConfig {
            min_bucket_candidates: usize::MAX,
            ..Default::default()
        };
        let a = name_matches(&index, "Claude Plugin 3", &narrowed);
        let b = name_matches(&index, "Claude Plugin 3", &full_scan);
        let names = |m: &[(&IndexedRecord, f64)]| {
            m.iter()
                .map(|(e, s)| (e.record.display_name.clone(), *s))
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&a), names(&b));
        assert_eq!(a[0].0.record.display_name, "Claude Plugin 3");
    }

    #[test]
    fn test_confirmed_description_match() {
        let desc = "A statusline that shows token usage and git branch for Claude Code";
        let d = detector(vec![record("Statusbar", "https://a.dev").with_description(desc)], vec![]);
        let result = d.check(&record("Different Name", "https://b.dev").with_description(desc));
        assert!(result.is_duplicate);
        assert_eq!(result.duplicate_type, Some(DuplicateType::DescriptionSimilar));
        assert!(result.checks.name.as_ref().unwrap().passed);
    }

    #[test]
    fn test_short_existing_description_is_compared() {
        let d = detector(
            vec![record("Helper", "https://a.dev").with_description("Claude Code helper")],
            vec![],
        );
        let result = d.check(&record("Assistant", "https://b.dev").with_description("Claude Code helper!!!"));
        assert!(result.is_duplicate);
        assert_eq!(result.duplicate_type, Some(DuplicateType::DescriptionSimilar));
        assert_eq!(result.similarity_score, 1.0);
    }

    #[test]
    fn test_advisory_description_match_is_not_a_duplicate() {
        // 9 shared tokens out of 10
        let d = detector(
            vec![record("Tabby", "https://a.dev")
                .with_description("Manage Claude Code sessions from one terminal with tabs")],
            vec![],
        );
        let result = d.check(
            &record("Session Manager", "https://b.dev")
                .with_description("Manage Claude Code sessions from one terminal with tabs quickly"),
        );
        assert!(!result.is_duplicate);
        assert!(result.duplicate_type.is_none());
        assert_eq!(result.similarity_score, 0.0);
        let desc = result.checks.description.as_ref().unwrap();
        assert!(!desc.passed);
        assert_eq!(desc.similar.len(), 1);
        assert_eq!(desc.similar[0].name, "Tabby");
        assert!((desc.similar[0].score - 0.9).abs() < 1e-9);
        assert!(result.is_advisory());
        assert_eq!(result.advisory_matches()[0].0, "description");
    }

    #[test]
    fn test_near_match_fails_the_check_without_evidence_slots() {
        let index = ResourceIndex::build(
            vec![record("Claude-Code-Helper!!", "https://a.dev")],
            vec![],
            &NormalizeConfig::default(),
        );
        let config = DedupConfig {
            evidence_limit: 0,
            ..Default::default()
        };
        let result = check_duplicate(&index, &record("Claude Code Helper", "https://b.dev"), &config);
        assert!(!result.is_duplicate);
        let name = result.checks.name.as_ref().unwrap();
        assert!(!name.passed);
        assert!(name.similar.is_empty());
        assert!(result.is_advisory());
    }

    #[test]
    fn test_description_falls_back_to_localized_text() {
        let desc = "A statusline that shows token usage and git branch for Claude Code";
        let mut existing = record("Statusbar", "https://a.dev");
        existing.description_localized = desc.to_string();
        let d = detector(vec![existing], vec![]);
        let result = d.check(&record("Different Name", "https://b.dev").with_description(desc));
        assert_eq!(result.duplicate_type, Some(DuplicateType::DescriptionSimilar));
    }

    #[test]
    fn test_short_description_is_never_compared() {
        let d = detector(
            vec![record("Statusbar", "https://a.dev").with_description("short text")],
            vec![],
        );
        let result = d.check(&record("Other", "https://b.dev").with_description("short text"));
        assert!(!result.is_duplicate);
        let desc = result.checks.description.as_ref().unwrap();
        assert!(desc.passed);
        assert!(desc.similar.is_empty());
    }

    #[test]
    fn test_description_matches_are_capped() {
        let desc = "Manage multiple Claude Code sessions from a single terminal window";
        let existing: Vec<ResourceRecord> = (0..8)
            .map(|i| record(&format!("Session Tool {}", i), &format!("https://s{}.dev", i)).with_description(desc))
            .collect();
        let d = detector(existing, vec![]);
        assert_eq!(d.similar_descriptions(desc).len(), 5);
    }

    #[test]
    fn test_empty_index_never_reports_duplicates() {
        let d = detector(vec![], vec![]);
        let candidate = record("Claude Code Helper", "https://github.com/a/b")
            .with_description("A helper for running Claude Code in CI pipelines");
        let result = d.check(&candidate);
        assert!(!result.is_duplicate);
        assert!(result.duplicate_type.is_none());
        assert!(result.checks.url.as_ref().unwrap().passed);
        assert!(result.checks.repository.as_ref().unwrap().passed);
        assert!(result.checks.name.as_ref().unwrap().passed);
        assert!(result.checks.description.as_ref().unwrap().passed);
    }

    #[test]
    fn test_blank_candidate_passes_every_check() {
        let d = detector(vec![record("", ""), record("Tool", "https://t.dev")], vec![]);
        let result = d.check(&ResourceRecord::default());
        assert!(!result.is_duplicate);
        assert!(!result.is_advisory());
    }

    #[test]
    fn test_check_batch_preserves_order() {
        let d = detector(vec![record("Tool", "https://t.dev")], vec![]);
        let results = d.check_batch(&[
            record("First", "https://t.dev"),
            record("Second", "https://other.dev"),
        ]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].resource_name, "First");
        assert!(results[0].is_duplicate);
        assert!(!results[1].is_duplicate);
    }

    #[test]
    fn test_free_function_matches_detector() {
        let existing = vec![record("Tool", "https://t.dev")];
        let index = ResourceIndex::build(existing.clone(), vec![], &NormalizeConfig::default());
        let config = DedupConfig::default();
        let candidate = record("Tool", "https://other.dev");
        let free = check_duplicate(&index, &candidate, &config);
        let d = DuplicateDetector::new(index, config);
        assert_eq!(free, d.check(&candidate));
    }
}
