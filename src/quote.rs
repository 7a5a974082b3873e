//! Delimiter-aware quoting and escaping for TOON scalars.
//!
//! Strings are written unquoted whenever they can be read back losslessly;
//! [`needs_quoting`] decides, [`quote`] / [`unquote`] apply and invert the
//! wrapping. The module also owns [`split_delimited`], the quote- and
//! escape-aware field splitter used for inline arrays and tabular rows.
//!
//! Invariant: `unquote(&quote(s, d)) == s` for every string `s` and
//! delimiter `d`.

use crate::Delimiter;

/// Returns `true` when `s` cannot be written bare under the given delimiter.
///
/// A string must be quoted when it is empty, reads as a keyword
/// (`true`/`false`/`null`, case-insensitive), looks numeric, contains the
/// active delimiter, contains structural characters (`:`, `[`, `]`, `{`,
/// `}`, `#`), line breaks or tabs, quote characters or backslashes, or
/// starts/ends with whitespace.
///
/// # Examples
///
/// ```rust
/// use toonify::{needs_quoting, Delimiter};
///
/// assert!(needs_quoting("", Delimiter::Comma));
/// assert!(needs_quoting("True", Delimiter::Comma));
/// assert!(needs_quoting("3.14", Delimiter::Comma));
/// assert!(needs_quoting("a,b", Delimiter::Comma));
/// assert!(!needs_quoting("a,b", Delimiter::Pipe));
/// assert!(!needs_quoting("hello world", Delimiter::Comma));
/// ```
#[must_use]
pub fn needs_quoting(s: &str, delimiter: Delimiter) -> bool {
    if s.is_empty() {
        return true;
    }

    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") || s.eq_ignore_ascii_case("null") {
        return true;
    }

    if looks_numeric(s) {
        return true;
    }

    if s.contains(delimiter.as_char()) {
        return true;
    }

    if s.chars().any(|c| {
        matches!(
            c,
            ':' | '[' | ']' | '{' | '}' | '#' | '\n' | '\r' | '\t' | '"' | '\'' | '\\'
        )
    }) {
        return true;
    }

    s.trim() != s
}

/// Whether a bare token would parse back as a number.
pub(crate) fn looks_numeric(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && s.parse::<f64>().is_ok()
}

/// Escapes backslash, double-quote, newline, carriage return and tab.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverts [`escape`]. Unknown escape sequences are preserved literally.
#[must_use]
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Wraps `s` in double quotes with escapes when [`needs_quoting`] holds;
/// otherwise returns `s` unchanged.
///
/// # Examples
///
/// ```rust
/// use toonify::{quote, Delimiter};
///
/// assert_eq!(quote("hello", Delimiter::Comma), "hello");
/// assert_eq!(quote("a,b", Delimiter::Comma), "\"a,b\"");
/// assert_eq!(quote("", Delimiter::Comma), "\"\"");
/// ```
#[must_use]
pub fn quote(s: &str, delimiter: Delimiter) -> String {
    if needs_quoting(s, delimiter) {
        format!("\"{}\"", escape(s))
    } else {
        s.to_string()
    }
}

/// Strips matching double or single quotes and unescapes the content;
/// returns unquoted input trimmed but otherwise unchanged.
///
/// # Examples
///
/// ```rust
/// use toonify::unquote;
///
/// assert_eq!(unquote("\"a,b\""), "a,b");
/// assert_eq!(unquote("'ok'"), "ok");
/// assert_eq!(unquote("plain"), "plain");
/// ```
#[must_use]
pub fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2 {
        let quoted = (s.starts_with('"') && s.ends_with('"'))
            || (s.starts_with('\'') && s.ends_with('\''));
        if quoted {
            return unescape(&s[1..s.len() - 1]);
        }
    }
    s.to_string()
}

/// Whether a trimmed token is wrapped in matching single or double quotes.
pub(crate) fn is_quoted(s: &str) -> bool {
    s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"'))
            || (s.starts_with('\'') && s.ends_with('\'')))
}

/// Splits `s` on the delimiter, honoring double quotes and backslash
/// escapes. Quote and escape characters are kept in the pieces so the
/// scalar parser can resolve them; pieces are trimmed.
///
/// An empty input yields no pieces; a trailing delimiter yields a trailing
/// empty piece.
#[must_use]
pub fn split_delimited(s: &str, delimiter: Delimiter) -> Vec<String> {
    let delim = delimiter.as_char();
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape_next = false;

    for ch in s.chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
            continue;
        }
        match ch {
            '\\' => {
                current.push(ch);
                escape_next = true;
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            c if c == delim && !in_quotes => {
                result.push(current.trim().to_string());
                current.clear();
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() || !result.is_empty() {
        result.push(current.trim().to_string());
    }

    result
}
