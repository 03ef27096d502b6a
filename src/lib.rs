//! Curate: deduplication and relevance scoring for a curated resource list
//!
//! The catalog is a CSV of reviewed resources; crawlers feed a pending queue
//! of candidates and declined candidates are kept in a rejected set. This
//! crate decides, for each candidate:
//! - whether it duplicates a catalog or rejected entry (exact URL, repository
//!   identity, near-identical name or description)
//! - how relevant it looks, for ranking before review
//!
//! Nothing here writes the catalog or queues; results are returned for the
//! caller (or a reviewer) to act on.

pub mod candidate;
pub mod config;
pub mod dedup;
pub mod index;
pub mod normalize;
pub mod scoring;
pub mod similarity;
pub mod store;
pub mod types;
pub mod util;

pub use config::Config;
pub use dedup::{check_duplicate, DuplicateCheckResult, DuplicateDetector, DuplicateType};
pub use index::ResourceIndex;
pub use normalize::{extract_repo_identity, normalize_url, RepoIdentity};
pub use scoring::{score_relevance, RelevanceFields, RelevanceScorer};
pub use similarity::name_similarity;
pub use types::*;
