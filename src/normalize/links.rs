//! Link extraction from free text
//!
//! Discovered posts carry their links inline; these helpers pull them out
//! and decide whether a link is worth turning into a candidate.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

static RE_URL: OnceLock<Regex> = OnceLock::new();
static RE_GITHUB_REPO: OnceLock<Regex> = OnceLock::new();

/// Hosts never worth a candidate (social, search, media, shopping)
pub const EXCLUDED_DOMAINS: &[&str] = &[
    "twitter.com",
    "x.com",
    "facebook.com",
    "linkedin.com",
    "youtube.com",
    "youtu.be",
    "reddit.com",
    "imgur.com",
    "medium.com",
    "dev.to",
    "news.ycombinator.com",
    "google.com",
    "bing.com",
    "amazon.com",
    "ebay.com",
];

/// Code and package hosts besides GitHub
pub const RELEVANT_DOMAINS: &[&str] = &[
    "gitlab.com",
    "bitbucket.org",
    "npmjs.com",
    "pypi.org",
    "crates.io",
    "pkg.go.dev",
    "anthropic.com",
    "claude.ai",
];

/// All http(s) URLs in `text`, in order of first appearance, without repeats.
///
/// Trailing punctuation is not part of the match, so a link that ends a
/// sentence comes out clean.
pub fn extract_urls(text: &str) -> Vec<String> {
    let re = RE_URL.get_or_init(|| {
        Regex::new(r#"https?://[^\s<>"')\]]+[^\s<>"')\].,;:!?]"#).unwrap()
    });

    let mut seen = HashSet::new();
    re.find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|u| seen.insert(u.clone()))
        .collect()
}

/// First GitHub repository URL in `text`, reduced to `https://github.com/owner/repo`.
pub fn extract_github_url(text: &str) -> Option<String> {
    let re = RE_GITHUB_REPO
        .get_or_init(|| Regex::new(r"https?://github\.com/[\w\-]+/[\w\-\.]+").unwrap());

    let found = re.find(text)?.as_str().trim_end_matches('.');
    let found = found.strip_suffix(".git").unwrap_or(found);
    Some(found.to_string())
}

/// Whether `url` is worth considering as a resource link.
///
/// Excluded hosts lose, then GitHub and known code/package hosts win.
/// Anything unparseable or unknown is not relevant.
pub fn is_relevant_url(url: &str) -> bool {
    let host = match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(h) => h.to_lowercase(),
            None => return false,
        },
        Err(_) => return false,
    };

    if EXCLUDED_DOMAINS.iter().any(|d| host_matches(&host, d)) {
        return false;
    }

    if host_matches(&host, super::REPOSITORY_HOST) {
        return true;
    }

    RELEVANT_DOMAINS.iter().any(|d| host_matches(&host, d))
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|rest| rest.ends_with('.'))
}
