//! Shared utility functions

/// Truncate a string to at most `max_chars` characters, ending in "..." if truncated.
/// Counts characters, not bytes, so CJK text is cut at the same length as ASCII.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let suffix = "...";
    let keep = max_chars.saturating_sub(suffix.chars().count());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(suffix);
    out
}
