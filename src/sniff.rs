//! Format sniffing: locating a TOON payload inside surrounding prose.
//!
//! LLM responses usually wrap structured output in markdown fences. This
//! module narrows such text down to the TOON document itself before it is
//! handed to the decoder; it never builds a value tree.
//!
//! ```rust
//! use toonify::extract_toon_block;
//!
//! let reply = "Here you go:\n```toon\nname: Alice\nage: 30\n```\nDone.";
//! assert_eq!(extract_toon_block(reply).as_deref(), Some("name: Alice\nage: 30"));
//! ```

use crate::Delimiter;
use once_cell::sync::Lazy;
use regex::Regex;

static TOON_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?si)```[ \t]*toon[ \t]*\n(.*?)\n[ \t]*```").unwrap());

static ANY_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:\w+)?[ \t]*\n(.*?)\n[ \t]*```").unwrap());

static NAMED_TABULAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^[a-z_][a-z0-9_]*\[\d+[,|\t]?\]\{[a-z_][a-z0-9_,]*\}:").unwrap());

static BARE_TABULAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^\[\d+[,|\t]?\]\{[a-z_][a-z0-9_,]*\}:").unwrap());

static ARRAY_HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\[\d+[,|\t]\]:").unwrap());

static KEY_VALUE_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z_][a-z0-9_]*:\s*.+$").unwrap());

static TAB_HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\t\]").unwrap());

static PIPE_HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\|\]").unwrap());

/// Heuristically recognizes TOON-shaped text: an array or tabular header
/// anywhere, or at least two `key: value` lines. A single `key: value` line
/// is not enough, it could just as well be YAML or prose.
#[must_use]
pub fn looks_like_toon(content: &str) -> bool {
    let content = content.trim();
    if content.is_empty() {
        return false;
    }

    if NAMED_TABULAR_RE.is_match(content)
        || BARE_TABULAR_RE.is_match(content)
        || ARRAY_HEADER_RE.is_match(content)
    {
        return true;
    }

    let key_value_lines = content
        .lines()
        .map(str::trim)
        .filter(|line| KEY_VALUE_LINE_RE.is_match(line))
        .count();

    key_value_lines >= 2
}

/// Extracts the TOON payload from text that may wrap it in markdown.
///
/// Preference order: a fenced block labeled `toon`/`TOON`; the first fenced
/// block of any kind whose trimmed content looks like TOON; when the text
/// has no fences at all, the whole trimmed text if it looks like TOON.
///
/// Returns the trimmed block body, never the surrounding prose.
#[must_use]
pub fn extract_toon_block(content: &str) -> Option<String> {
    if let Some(caps) = TOON_FENCE_RE.captures(content) {
        return caps.get(1).map(|m| m.as_str().trim().to_string());
    }

    let mut saw_fence = false;
    for caps in ANY_FENCE_RE.captures_iter(content) {
        saw_fence = true;
        if let Some(block) = caps.get(1) {
            let trimmed = block.as_str().trim();
            if looks_like_toon(trimmed) {
                return Some(trimmed.to_string());
            }
        }
    }
    if saw_fence {
        return None;
    }

    let trimmed = content.trim();
    if looks_like_toon(trimmed) {
        return Some(trimmed.to_string());
    }

    None
}

/// Detects the delimiter a TOON document was encoded with by inspecting its
/// array headers. Defaults to comma when no explicit symbol is present.
///
/// # Examples
///
/// ```rust
/// use toonify::{detect_delimiter, Delimiter};
///
/// assert_eq!(detect_delimiter("[3|]: 1|2|3"), Delimiter::Pipe);
/// assert_eq!(detect_delimiter("name: Alice"), Delimiter::Comma);
/// ```
#[must_use]
pub fn detect_delimiter(toon: &str) -> Delimiter {
    if TAB_HEADER_RE.is_match(toon) {
        return Delimiter::Tab;
    }
    if PIPE_HEADER_RE.is_match(toon) {
        return Delimiter::Pipe;
    }
    Delimiter::Comma
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_toon_headers() {
        assert!(looks_like_toon("[3,]: 1,2,3"));
        assert!(looks_like_toon("users[2,]{id,name}:\n  1,A\n  2,B"));
        assert!(looks_like_toon("[2]{id,name}:\n  1,A"));
    }

    #[test]
    fn test_looks_like_toon_key_value_threshold() {
        assert!(looks_like_toon("name: Alice\nage: 30"));
        assert!(!looks_like_toon("name: Alice"));
        assert!(!looks_like_toon(""));
        assert!(!looks_like_toon("just some prose"));
    }

    #[test]
    fn test_extract_labeled_fence() {
        let text = "intro\n```toon\nname: Alice\n```\noutro";
        assert_eq!(extract_toon_block(text).as_deref(), Some("name: Alice"));

        let upper = "```TOON\nname: Bob\nage: 1\n```";
        assert_eq!(extract_toon_block(upper).as_deref(), Some("name: Bob\nage: 1"));
    }

    #[test]
    fn test_extract_prefers_labeled_over_earlier_fence() {
        let text = "```json\n{\"a\": 1}\n```\n```toon\nname: Alice\n```";
        assert_eq!(extract_toon_block(text).as_deref(), Some("name: Alice"));
    }

    #[test]
    fn test_extract_unlabeled_fence_by_sniffing() {
        let text = "result:\n```\nname: Alice\nage: 30\n```";
        assert_eq!(
            extract_toon_block(text).as_deref(),
            Some("name: Alice\nage: 30")
        );
    }

    #[test]
    fn test_fences_present_but_none_toon() {
        let text = "```python\nprint('hi')\n```";
        assert_eq!(extract_toon_block(text), None);
    }

    #[test]
    fn test_whole_text_fallback_only_without_fences() {
        assert_eq!(
            extract_toon_block("name: Alice\nage: 30").as_deref(),
            Some("name: Alice\nage: 30")
        );
        assert_eq!(extract_toon_block("plain prose"), None);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("[2\t]: a\tb"), Delimiter::Tab);
        assert_eq!(detect_delimiter("xs[4|]: a|b|c|d"), Delimiter::Pipe);
        assert_eq!(detect_delimiter("[2,]: a,b"), Delimiter::Comma);
    }
}
