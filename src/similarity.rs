//! String similarity measures for names and descriptions
//!
//! Names are short and word-order sensitive, so they blend token overlap
//! with normalized edit distance. Descriptions are free text and use token
//! overlap alone.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static RE_WORD: OnceLock<Regex> = OnceLock::new();

/// Default share of Jaccard similarity in the composite name score
pub const DEFAULT_JACCARD_WEIGHT: f64 = 0.4;

/// Lower-cased word tokens of `text` (Unicode `\w+` runs)
pub fn tokenize(text: &str) -> HashSet<String> {
    let re = RE_WORD.get_or_init(|| Regex::new(r"\w+").unwrap());
    let lower = text.to_lowercase();
    re.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Token-set similarity: |A ∩ B| / |A ∪ B|.
///
/// Returns 0.0 if either side is empty or has no word tokens.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    intersection as f64 / union as f64
}

/// `1 - levenshtein(a, b) / max(len(a), len(b))`, lengths in characters.
///
/// Two empty strings are identical (1.0).
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Composite name similarity with the default 0.4 / 0.6 weighting
pub fn name_similarity(a: &str, b: &str) -> f64 {
    weighted_name_similarity(a, b, DEFAULT_JACCARD_WEIGHT)
}

/// Composite name similarity.
///
/// Blank names score 0.0. Names equal after trimming and lower-casing score
/// 1.0. Otherwise `w * jaccard + (1 - w) * edit_similarity` on the trimmed,
/// lower-cased names.
pub fn weighted_name_similarity(a: &str, b: &str, jaccard_weight: f64) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let jaccard = jaccard_similarity(&a, &b);
    let edit = edit_similarity(&a, &b);
    jaccard_weight * jaccard + (1.0 - jaccard_weight) * edit
}

/// Description similarity: Jaccard only.
///
/// The length gate applies to the candidate description alone: a candidate
/// shorter than `min_length` characters scores 0.0, while a short existing
/// description is still compared.
pub fn description_similarity(candidate: &str, existing: &str, min_length: usize) -> f64 {
    if candidate.chars().count() < min_length {
        return 0.0;
    }
    jaccard_similarity(candidate, existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_tokenize_lowercases_and_splits_on_non_words() {
        let tokens = tokenize("Claude-Code: MCP server!");
        let expected: HashSet<String> = ["claude", "code", "mcp", "server"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_jaccard_basics() {
        assert!(approx(jaccard_similarity("a b c", "a b c"), 1.0));
        assert!(approx(jaccard_similarity("a b", "b c"), 1.0 / 3.0));
        assert!(approx(jaccard_similarity("alpha beta", "gamma delta"), 0.0));
        assert!(approx(jaccard_similarity("", "x"), 0.0));
        assert!(approx(jaccard_similarity("!!!", "???"), 0.0));
    }

    #[test]
    fn test_edit_similarity_counts_characters() {
        assert!(approx(edit_similarity("kitten", "sitting"), 1.0 - 3.0 / 7.0));
        assert!(approx(edit_similarity("中文", "中国"), 0.5));
        assert!(approx(edit_similarity("", ""), 1.0));
    }

    #[test]
    fn test_name_similarity_exact_match_ignores_case_and_padding() {
        assert!(approx(name_similarity("Foo", "foo"), 1.0));
        assert!(approx(name_similarity("  Claude Code ", "claude code"), 1.0));
    }

    #[test]
    fn test_blank_names_score_zero() {
        assert!(approx(name_similarity("", "x"), 0.0));
        assert!(approx(name_similarity("x", "   "), 0.0));
    }

    #[test]
    fn test_name_similarity_blends_token_and_edit_scores() {
        // jaccard 3/4, edit 1 - 5/23
        let score = name_similarity("Claude Code Helper", "Claude Code Helper Tool");
        let expected = 0.4 * 0.75 + 0.6 * (1.0 - 5.0 / 23.0);
        assert!(approx(score, expected));
        assert!(score < 0.85);

        // same tokens, punctuation differs
        let score = name_similarity("Claude Code Helper", "Claude-Code-Helper!!");
        assert!(approx(score, 0.4 + 0.6 * 0.8));
        assert!((0.85..0.95).contains(&score));
    }

    #[test]
    fn test_weighting_is_configurable() {
        let pure_edit = weighted_name_similarity("abc def", "abc xyz", 0.0);
        assert!(approx(pure_edit, edit_similarity("abc def", "abc xyz")));
        let pure_jaccard = weighted_name_similarity("abc def", "abc xyz", 1.0);
        assert!(approx(pure_jaccard, 1.0 / 3.0));
    }

    #[test]
    fn test_short_descriptions_are_not_compared() {
        assert!(approx(description_similarity("too short", "too short", 20), 0.0));
        let long = "a tool that manages claude code sessions";
        assert!(approx(description_similarity(long, long, 20), 1.0));
    }

    #[test]
    fn test_short_existing_description_is_still_compared() {
        let candidate = "Claude Code helper!!!";
        assert!(approx(description_similarity(candidate, "Claude Code helper", 20), 1.0));
        assert!(approx(description_similarity("Claude Code helper", candidate, 20), 0.0));
    }

    proptest! {
        #[test]
        fn jaccard_self_similarity(s in "[a-z]{1,8}( [a-z]{1,8}){0,5}") {
            prop_assert!(approx(jaccard_similarity(&s, &s), 1.0));
        }

        #[test]
        fn name_self_similarity(s in "\\PC*[^\\s]\\PC*") {
            prop_assert!(approx(name_similarity(&s, &s), 1.0));
        }

        #[test]
        fn similarities_are_symmetric_and_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
            for (x, y) in [
                (jaccard_similarity(&a, &b), jaccard_similarity(&b, &a)),
                (edit_similarity(&a, &b), edit_similarity(&b, &a)),
                (name_similarity(&a, &b), name_similarity(&b, &a)),
            ] {
                prop_assert!(approx(x, y));
                prop_assert!((0.0..=1.0).contains(&x));
            }
        }

        #[test]
        fn disjoint_tokens_have_zero_jaccard(a in "[a-m]{1,6}( [a-m]{1,6}){0,3}", b in "[n-z]{1,6}( [n-z]{1,6}){0,3}") {
            prop_assert!(approx(jaccard_similarity(&a, &b), 0.0));
        }
    }
}
