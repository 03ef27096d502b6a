//! In-memory resource index
//!
//! Built once per batch from the catalog followed by the rejected set, then
//! treated as read-only. The pending queue is what gets checked, so it is
//! never indexed.

use crate::config::NormalizeConfig;
use crate::normalize::{extract_repo_identity, normalize_url, RepoIdentity};
use crate::types::{RecordOrigin, ResourceRecord};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// A reference record and the set it came from
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRecord {
    pub record: ResourceRecord,
    pub origin: RecordOrigin,
}

/// Read-only lookup structures over reference records
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    /// Catalog records first, then rejected records
    records: Vec<IndexedRecord>,
    /// Normalized URL -> record position (last write wins)
    url_index: HashMap<String, usize>,
    /// Repository identity -> record position (last write wins)
    repo_index: HashMap<RepoIdentity, usize>,
    /// First word of lower-cased name -> record positions
    name_index: HashMap<String, Vec<usize>>,
    /// Options the URL keys were built with
    normalize: NormalizeConfig,
    catalog_len: usize,
}

impl ResourceIndex {
    /// Build the index from catalog and rejected records.
    ///
    /// Records with a blank link get no URL or repository key; records with a
    /// blank name get no name bucket. Neither is an error.
    pub fn build(
        existing: Vec<ResourceRecord>,
        rejected: Vec<ResourceRecord>,
        options: &NormalizeConfig,
    ) -> Self {
        let catalog_len = existing.len();
        let records: Vec<IndexedRecord> = existing
            .into_iter()
            .map(|record| IndexedRecord {
                record,
                origin: RecordOrigin::Catalog,
            })
            .chain(rejected.into_iter().map(|record| IndexedRecord {
                record,
                origin: RecordOrigin::Rejected,
            }))
            .collect();

        let mut url_index = HashMap::new();
        let mut repo_index = HashMap::new();
        let mut name_index: HashMap<String, Vec<usize>> = HashMap::new();

        for (pos, entry) in records.iter().enumerate() {
            let link = &entry.record.primary_link;

            let normalized = normalize_url(link, options);
            if !normalized.is_empty() {
                url_index.insert(normalized, pos);
            }

            if let Some(identity) = extract_repo_identity(link) {
                repo_index.insert(identity, pos);
            }

            if let Some(word) = first_word(&entry.record.display_name) {
                name_index.entry(word).or_default().push(pos);
            }
        }

        debug!(
            "Built resource index: {} records ({} catalog), {} URL keys, {} repository keys, {} name buckets",
            records.len(),
            catalog_len,
            url_index.len(),
            repo_index.len(),
            name_index.len()
        );

        Self {
            records,
            url_index,
            repo_index,
            name_index,
            normalize: options.clone(),
            catalog_len,
        }
    }

    /// An index with no reference records
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All reference records in index order
    pub fn records(&self) -> &[IndexedRecord] {
        &self.records
    }

    /// Options URL keys were normalized with
    pub fn normalize_options(&self) -> &NormalizeConfig {
        &self.normalize
    }

    /// Record whose normalized link equals the normalized `url`
    pub fn lookup_url(&self, url: &str) -> Option<&IndexedRecord> {
        let normalized = normalize_url(url, &self.normalize);
        if normalized.is_empty() {
            return None;
        }
        self.url_index.get(&normalized).map(|&pos| &self.records[pos])
    }

    /// Record sharing the repository identity of `url`
    pub fn lookup_repo(&self, url: &str) -> Option<&IndexedRecord> {
        let identity = extract_repo_identity(url)?;
        self.repo_index.get(&identity).map(|&pos| &self.records[pos])
    }

    /// Records worth comparing against `name`, in index order.
    ///
    /// Buckets for the first three words of `name` are merged; when that
    /// yields fewer than `min_bucket_candidates` records every record is
    /// returned instead.
    pub fn name_candidates(&self, name: &str, min_bucket_candidates: usize) -> Vec<&IndexedRecord> {
        self.name_candidates_with(name, 3, min_bucket_candidates)
    }

    /// [`name_candidates`](Self::name_candidates) with an explicit prefix length
    pub fn name_candidates_with(
        &self,
        name: &str,
        prefix_words: usize,
        min_bucket_candidates: usize,
    ) -> Vec<&IndexedRecord> {
        let lower = name.to_lowercase();
        let narrowed: BTreeSet<usize> = lower
            .split_whitespace()
            .take(prefix_words)
            .filter_map(|word| self.name_index.get(word))
            .flatten()
            .copied()
            .collect();

        if narrowed.len() < min_bucket_candidates {
            self.records.iter().collect()
        } else {
            narrowed.into_iter().map(|pos| &self.records[pos]).collect()
        }
    }

    /// Index statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_records: self.records.len(),
            catalog_records: self.catalog_len,
            rejected_records: self.records.len() - self.catalog_len,
            url_keys: self.url_index.len(),
            repository_keys: self.repo_index.len(),
            name_buckets: self.name_index.len(),
        }
    }
}

fn first_word(name: &str) -> Option<String> {
    name.split_whitespace().next().map(|w| w.to_lowercase())
}

/// Index statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub total_records: usize,
    pub catalog_records: usize,
    pub rejected_records: usize,
    pub url_keys: usize,
    pub repository_keys: usize,
    pub name_buckets: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, link: &str) -> ResourceRecord {
        ResourceRecord::new(name, link)
    }

    fn build(existing: Vec<ResourceRecord>, rejected: Vec<ResourceRecord>) -> ResourceIndex {
        ResourceIndex::build(existing, rejected, &NormalizeConfig::default())
    }

    #[test]
    fn test_url_lookup_uses_normalized_form() {
        let index = build(vec![record("Tool", "https://github.com/a/b")], vec![]);
        let hit = index.lookup_url("HTTPS://WWW.GITHUB.COM/a/b/").unwrap();
        assert_eq!(hit.record.display_name, "Tool");
        assert_eq!(hit.origin, RecordOrigin::Catalog);
        assert!(index.lookup_url("https://github.com/a/c").is_none());
        assert!(index.lookup_url("").is_none());
    }

    #[test]
    fn test_url_collision_last_write_wins() {
        let index = build(
            vec![record("First", "https://example.com/x")],
            vec![record("Second", "https://example.com/x/")],
        );
        let hit = index.lookup_url("example.com/x").unwrap();
        assert_eq!(hit.record.display_name, "Second");
        assert_eq!(hit.origin, RecordOrigin::Rejected);
        assert_eq!(index.stats().url_keys, 1);
    }

    #[test]
    fn test_repo_lookup_ignores_subpaths() {
        let index = build(vec![record("Tool", "https://github.com/Owner/Repo")], vec![]);
        let hit = index
            .lookup_repo("https://github.com/owner/repo/tree/main/docs")
            .unwrap();
        assert_eq!(hit.record.display_name, "Tool");
        assert!(index.lookup_repo("https://example.com/owner/repo").is_none());
    }

    #[test]
    fn test_blank_links_and_names_are_not_keyed() {
        let index = build(vec![record("", ""), record("Named", "")], vec![]);
        let stats = index.stats();
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.url_keys, 0);
        assert_eq!(stats.repository_keys, 0);
        assert_eq!(stats.name_buckets, 1);
        assert!(index.lookup_url("   ").is_none());
    }

    #[test]
    fn test_small_buckets_fall_back_to_full_scan() {
        let index = build(
            vec![record("Alpha One", "https://a.dev"), record("Beta Two", "https://b.dev")],
            vec![record("Gamma", "https://c.dev")],
        );
        let candidates = index.name_candidates("alpha", 10);
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn test_large_buckets_narrow_the_scan() {
        let mut existing: Vec<ResourceRecord> = (0..12)
            .map(|i| record(&format!("Claude Tool {}", i), &format!("https://t{}.dev", i)))
            .collect();
        existing.push(record("Unrelated Thing", "https://u.dev"));
        let index = build(existing, vec![]);

        let candidates = index.name_candidates("Claude Helper", 10);
        assert_eq!(candidates.len(), 12);
        assert!(candidates
            .iter()
            .all(|c| c.record.display_name.starts_with("Claude")));

        // index order is preserved
        assert_eq!(candidates[0].record.display_name, "Claude Tool 0");
    }

    #[test]
    fn test_only_first_three_words_select_buckets() {
        let existing: Vec<ResourceRecord> = (0..10)
            .map(|i| record(&format!("fourth {}", i), &format!("https://f{}.dev", i)))
            .chain(std::iter::once(record("first", "https://first.dev")))
            .collect();
        let index = build(existing, vec![]);

        // "fourth" is beyond the prefix, so the narrowed set is just "first"
        // and the lookup falls back to everything
        let candidates = index.name_candidates("first second third fourth", 10);
        assert_eq!(candidates.len(), 11);

        let candidates = index.name_candidates_with("first second third fourth", 4, 10);
        assert_eq!(candidates.len(), 11);
        let candidates = index.name_candidates_with("fourth", 1, 10);
        assert_eq!(candidates.len(), 10);
    }

    #[test]
    fn test_stats_split_catalog_and_rejected() {
        let index = build(
            vec![
                record("A", "https://github.com/x/a"),
                record("B", "https://b.dev"),
            ],
            vec![record("C", "https://github.com/x/c")],
        );
        assert_eq!(
            index.stats(),
            IndexStats {
                total_records: 3,
                catalog_records: 2,
                rejected_records: 1,
                url_keys: 3,
                repository_keys: 2,
                name_buckets: 3,
            }
        );
    }

    #[test]
    fn test_empty_index() {
        let index = ResourceIndex::empty();
        assert!(index.is_empty());
        assert!(index.lookup_url("https://github.com/a/b").is_none());
        assert!(index.lookup_repo("https://github.com/a/b").is_none());
        assert!(index.name_candidates("anything", 10).is_empty());
    }
}
