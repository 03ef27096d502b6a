//! URL normalization and repository identity
//!
//! Normalized URLs are the primary dedup key. They are not meant to be
//! fetched: the scheme is dropped and the string is lowercased, so
//! `https://GitHub.com/Owner/Repo.git/` and `github.com/owner/repo` compare
//! equal.

pub mod links;

pub use links::{extract_github_url, extract_urls, is_relevant_url};

use crate::config::NormalizeConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize a URL for deduplication.
///
/// Steps, each gated by `options`:
/// - trim surrounding whitespace
/// - strip `http://` / `https://`
/// - strip a leading `www.`
/// - strip query string and fragment
/// - strip trailing slashes
/// - strip a trailing `.git`
/// - lowercase
///
/// Passes repeat until the string stops changing, so the result is a fixed
/// point: `normalize_url(&normalize_url(u, o), o) == normalize_url(u, o)`.
/// Empty input yields an empty string.
pub fn normalize_url(url: &str, options: &NormalizeConfig) -> String {
    let mut current = normalize_pass(url, options);
    // Every pass after the first either strips bytes or changes nothing.
    for _ in 0..=current.len() {
        let next = normalize_pass(&current, options);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn normalize_pass(url: &str, options: &NormalizeConfig) -> String {
    let mut s = url.trim();

    if options.strip_protocol {
        s = strip_prefix_ignore_case(s, "https://")
            .or_else(|| strip_prefix_ignore_case(s, "http://"))
            .unwrap_or(s);
    }

    if options.strip_www {
        s = strip_prefix_ignore_case(s, "www.").unwrap_or(s);
    }

    if options.strip_query {
        if let Some(pos) = s.find(['?', '#']) {
            s = &s[..pos];
        }
    }

    if options.strip_trailing_slash {
        s = s.trim_end_matches('/');
    }

    if options.strip_git_suffix {
        s = strip_suffix_ignore_case(s, ".git").unwrap_or(s);
    }

    if options.lowercase {
        s.to_lowercase()
    } else {
        s.to_string()
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let n = prefix.len();
    if s.len() >= n && s.is_char_boundary(n) && s[..n].eq_ignore_ascii_case(prefix) {
        Some(&s[n..])
    } else {
        None
    }
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let n = suffix.len();
    if s.len() < n {
        return None;
    }
    let start = s.len() - n;
    if s.is_char_boundary(start) && s[start..].eq_ignore_ascii_case(suffix) {
        Some(&s[..start])
    } else {
        None
    }
}

/// Repository host used for identity matching
pub const REPOSITORY_HOST: &str = "github.com";

/// Lowercased `(owner, repo)` pair of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoIdentity {
    pub owner: String,
    pub repo: String,
}

impl RepoIdentity {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into().to_lowercase(),
            repo: repo.into().to_lowercase(),
        }
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Extract the `(owner, repo)` pair from a repository-hosting URL.
///
/// The URL is normalized with default options first. Only the first two path
/// segments after the host are considered; anything else (other hosts,
/// profile URLs, empty segments) yields `None`.
pub fn extract_repo_identity(url: &str) -> Option<RepoIdentity> {
    let normalized = normalize_url(url, &NormalizeConfig::default());
    let (host, path) = normalized.split_once('/')?;
    if !host.contains(REPOSITORY_HOST) {
        return None;
    }

    let mut segments = path.split('/');
    let owner = segments.next().filter(|s| !s.is_empty())?;
    let repo = segments.next().filter(|s| !s.is_empty())?;
    let repo = strip_suffix_ignore_case(repo, ".git").unwrap_or(repo);
    if repo.is_empty() {
        return None;
    }

    Some(RepoIdentity::new(owner, repo))
}

/// Whether `url` points at one of `hosts` (substring match on the lowercased URL)
pub fn is_repository_url(url: &str, hosts: &[String]) -> bool {
    let lower = url.to_lowercase();
    hosts.iter().any(|h| !h.is_empty() && lower.contains(&h.to_lowercase()))
}
