//! TOON decoding.
//!
//! [`Decoder`] parses TOON text back into a [`Value`] tree. Parsing is
//! line-oriented recursive descent: every non-blank line is classified once
//! into a [`LineClass`] tag with its extracted fields, and blocks of lines
//! sharing a base indentation are consumed by threading an explicit cursor
//! (the index where each sub-parse stopped) back to the caller.
//!
//! Strict mode (default) raises on any declared-vs-actual count mismatch;
//! lenient mode substitutes null for missing fields and accepts short
//! collections.
//!
//! ```rust
//! use toonify::{decode, Value};
//!
//! let value = decode("name: Alice\nage: 30").unwrap();
//! let obj = value.as_object().unwrap();
//! assert_eq!(obj.get("name").and_then(Value::as_str), Some("Alice"));
//! assert_eq!(obj.get("age").and_then(Value::as_i64), Some(30));
//! ```

use crate::quote::{is_quoted, looks_numeric, split_delimited, unquote};
use crate::{DecodeOptions, Delimiter, Error, Number, Result, ToonMap, Value};
use once_cell::sync::Lazy;
use regex::Regex;

/// Hard cap on nesting depth; exceeding it is a decode error instead of a
/// stack overflow on adversarial input.
const MAX_DEPTH: usize = 64;

static NAMED_ARRAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\[([^\d\]]*)(\d+)([,|\t])?\](?:\{([^}]+)\})?:(.*)$")
        .unwrap()
});

static BARE_ARRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\d\]]*)(\d+)([,|\t])?\](?:\{([^}]+)\})?:(.*)$").unwrap());

static KEY_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*):(.*)$").unwrap());

static ITEM_KEY_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^([^\s:"'-][^:]*?)\s*:\s*(.*)$"#).unwrap());

static INLINE_PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*:\s*(.+)$").unwrap());

/// Per-line classification, computed once and dispatched by tag. Priority
/// order: named header, bare header, key-value, list item.
#[derive(Debug)]
enum LineClass<'a> {
    NamedArrayHeader { key: &'a str, header: ArrayHeader<'a> },
    BareArrayHeader { header: ArrayHeader<'a> },
    KeyValue { key: &'a str, value: &'a str },
    ListItem { content: &'a str },
    Blank,
    Unrecognized,
}

/// Fields extracted from an array header line:
/// `name?[marker? count delim?]{col,...}?: inline?`.
#[derive(Debug)]
struct ArrayHeader<'a> {
    count: usize,
    delimiter: Delimiter,
    columns: Option<Vec<&'a str>>,
    inline: &'a str,
}

fn classify(trimmed: &str) -> LineClass<'_> {
    if trimmed.is_empty() {
        return LineClass::Blank;
    }

    if let Some(caps) = NAMED_ARRAY_RE.captures(trimmed) {
        if let Some(header) = header_from_captures(&caps, 2) {
            let key = caps.get(1).map_or("", |m| m.as_str());
            return LineClass::NamedArrayHeader { key, header };
        }
    }

    if let Some(caps) = BARE_ARRAY_RE.captures(trimmed) {
        if let Some(header) = header_from_captures(&caps, 1) {
            return LineClass::BareArrayHeader { header };
        }
    }

    if let Some(caps) = KEY_VALUE_RE.captures(trimmed) {
        let key = caps.get(1).map_or("", |m| m.as_str());
        let value = caps.get(2).map_or("", |m| m.as_str()).trim();
        return LineClass::KeyValue { key, value };
    }

    if trimmed == "-" {
        return LineClass::ListItem { content: "" };
    }
    if let Some(rest) = trimmed.strip_prefix("- ") {
        return LineClass::ListItem {
            content: rest.trim(),
        };
    }

    LineClass::Unrecognized
}

/// Builds an [`ArrayHeader`] from regex captures starting at the count's
/// marker group. Returns `None` when the declared count does not fit a
/// `usize`, which demotes the line to unrecognized.
fn header_from_captures<'a>(caps: &regex::Captures<'a>, base: usize) -> Option<ArrayHeader<'a>> {
    let count: usize = caps.get(base + 1)?.as_str().parse().ok()?;
    let delimiter = match caps.get(base + 2).map(|m| m.as_str()) {
        Some("|") => Delimiter::Pipe,
        Some("\t") => Delimiter::Tab,
        _ => Delimiter::Comma,
    };
    let columns = caps
        .get(base + 3)
        .map(|m| m.as_str().split(',').map(str::trim).collect());
    let inline = caps.get(base + 4).map_or("", |m| m.as_str()).trim();
    Some(ArrayHeader {
        count,
        delimiter,
        columns,
        inline,
    })
}

/// The TOON decoder.
///
/// Holds immutable configuration fixed at construction; independent
/// [`Decoder::decode`] calls may run concurrently.
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Decoder { options }
    }

    /// Parses TOON text into a value tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] on empty input, on nesting beyond the
    /// depth cap, and in strict mode on any count or key mismatch.
    pub fn decode(&self, input: &str) -> Result<Value> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::decode(0, "empty TOON input"));
        }

        let lines: Vec<&str> = trimmed.lines().collect();

        // A one-line document with no recognized structure is a bare scalar.
        if lines.len() == 1 {
            if let LineClass::Unrecognized = classify(lines[0].trim()) {
                return Ok(self.parse_scalar(lines[0].trim()));
            }
        }

        let (value, _) = self.parse_block(&lines, 0, 0)?;
        Ok(value)
    }

    /// Indentation level of a line in units of the configured width.
    fn indent_level(&self, line: &str) -> usize {
        indent_spaces(line) / self.options.indent.max(1)
    }

    /// Parses the block starting at `start`: a maximal run of lines at or
    /// above the indentation of its first non-blank line. Returns the value
    /// and the index of the first line not consumed.
    fn parse_block(&self, lines: &[&str], start: usize, depth: usize) -> Result<(Value, usize)> {
        if depth > MAX_DEPTH {
            return Err(Error::decode(start + 1, "maximum nesting depth exceeded"));
        }

        let first = match next_non_blank(lines, start) {
            Some(idx) => idx,
            None => return Ok((Value::Object(ToonMap::new()), start)),
        };
        let base = self.indent_level(lines[first]);

        // The first significant line decides what the block resolves to.
        match classify(lines[first].trim()) {
            LineClass::BareArrayHeader { header } => {
                self.resolve_array(lines, first, &header, base, depth + 1)
            }
            LineClass::ListItem { .. } => self.parse_dash_block(lines, first, base, depth),
            _ => self.parse_object_block(lines, first, base, depth),
        }
    }

    /// An uncounted run of `- ` items at one indentation level, as found
    /// under a blank-valued key.
    fn parse_dash_block(
        &self,
        lines: &[&str],
        start: usize,
        base: usize,
        depth: usize,
    ) -> Result<(Value, usize)> {
        let mut items = Vec::new();
        let mut i = start;

        while i < lines.len() {
            let trimmed = lines[i].trim();
            if trimmed.is_empty() {
                i += 1;
                continue;
            }
            let level = self.indent_level(lines[i]);
            if level < base {
                break;
            }
            match classify(trimmed) {
                LineClass::ListItem { content } if level == base => {
                    let (value, end) = self.parse_list_item(lines, i, content, depth + 1)?;
                    items.push(value);
                    i = end;
                }
                _ => i += 1,
            }
        }

        Ok((Value::Array(items), i))
    }

    fn parse_object_block(
        &self,
        lines: &[&str],
        start: usize,
        base: usize,
        depth: usize,
    ) -> Result<(Value, usize)> {
        let mut map = ToonMap::new();
        let mut i = start;

        while i < lines.len() {
            let line = lines[i];
            let trimmed = line.trim();
            if trimmed.is_empty() {
                i += 1;
                continue;
            }
            let level = self.indent_level(line);
            if level < base {
                break;
            }

            match classify(trimmed) {
                LineClass::NamedArrayHeader { key, header } => {
                    let (value, end) = self.resolve_array(lines, i, &header, level, depth + 1)?;
                    map.insert(key.to_string(), value);
                    i = end;
                }
                LineClass::KeyValue { key, value } => {
                    if value.is_empty() {
                        // Block value only when something deeper follows;
                        // otherwise the key holds the empty object.
                        match next_non_blank(lines, i + 1) {
                            Some(j) if self.indent_level(lines[j]) > level => {
                                let (nested, end) = self.parse_block(lines, i + 1, depth + 1)?;
                                map.insert(key.to_string(), nested);
                                i = end;
                            }
                            _ => {
                                map.insert(key.to_string(), Value::Object(ToonMap::new()));
                                i += 1;
                            }
                        }
                    } else {
                        map.insert(key.to_string(), self.parse_scalar(value));
                        i += 1;
                    }
                }
                // Stray dashes, bare headers mid-object and anything
                // unrecognized are skipped, not errors.
                _ => i += 1,
            }
        }

        Ok((Value::Object(map), i))
    }

    /// Resolves an array header line into its value: inline primitives,
    /// tabular rows, or a counted list of items.
    fn resolve_array(
        &self,
        lines: &[&str],
        header_idx: usize,
        header: &ArrayHeader,
        header_level: usize,
        depth: usize,
    ) -> Result<(Value, usize)> {
        if depth > MAX_DEPTH {
            return Err(Error::decode(
                header_idx + 1,
                "maximum nesting depth exceeded",
            ));
        }

        if !header.inline.is_empty() {
            let pieces = split_delimited(header.inline, header.delimiter);
            if self.options.strict && pieces.len() != header.count {
                return Err(Error::decode(
                    header_idx + 1,
                    format!(
                        "array length mismatch: expected {}, found {}",
                        header.count,
                        pieces.len()
                    ),
                ));
            }
            let values = pieces.iter().map(|p| self.parse_scalar(p)).collect();
            return Ok((Value::Array(values), header_idx + 1));
        }

        if let Some(columns) = &header.columns {
            return self.parse_tabular_rows(lines, header_idx, header, columns, header_level);
        }

        self.parse_counted_list(lines, header_idx, header.count, header_level, depth)
    }

    fn parse_tabular_rows(
        &self,
        lines: &[&str],
        header_idx: usize,
        header: &ArrayHeader,
        columns: &[&str],
        header_level: usize,
    ) -> Result<(Value, usize)> {
        let mut rows = Vec::with_capacity(header.count);
        let mut i = header_idx + 1;

        while rows.len() < header.count && i < lines.len() {
            let trimmed = lines[i].trim();
            if trimmed.is_empty() {
                i += 1;
                continue;
            }
            if self.indent_level(lines[i]) <= header_level {
                break;
            }

            let cells = split_delimited(trimmed, header.delimiter);
            if self.options.strict && cells.len() != columns.len() {
                return Err(Error::decode(
                    i + 1,
                    format!(
                        "row field count mismatch: expected {}, found {}",
                        columns.len(),
                        cells.len()
                    ),
                ));
            }

            let mut row = ToonMap::with_capacity(columns.len());
            for (ci, column) in columns.iter().enumerate() {
                let value = cells
                    .get(ci)
                    .map(|cell| self.parse_scalar(cell))
                    .unwrap_or(Value::Null);
                row.insert((*column).to_string(), value);
            }
            rows.push(Value::Object(row));
            i += 1;
        }

        if self.options.strict {
            if rows.len() != header.count {
                return Err(Error::decode(
                    header_idx + 1,
                    format!(
                        "tabular row count mismatch: expected {}, found {}",
                        header.count,
                        rows.len()
                    ),
                ));
            }
            // Rows beyond the declared count would be left dangling below
            // the header.
            if let Some(j) = next_non_blank(lines, i) {
                if self.indent_level(lines[j]) > header_level {
                    return Err(Error::decode(
                        j + 1,
                        format!(
                            "tabular row count mismatch: expected {}, found excess rows",
                            header.count
                        ),
                    ));
                }
            }
        }

        Ok((Value::Array(rows), i))
    }

    fn parse_counted_list(
        &self,
        lines: &[&str],
        header_idx: usize,
        count: usize,
        header_level: usize,
        depth: usize,
    ) -> Result<(Value, usize)> {
        let mut items = Vec::with_capacity(count);
        let mut i = header_idx + 1;

        while items.len() < count && i < lines.len() {
            let trimmed = lines[i].trim();
            if trimmed.is_empty() {
                i += 1;
                continue;
            }
            if self.indent_level(lines[i]) <= header_level {
                break;
            }
            match classify(trimmed) {
                LineClass::ListItem { content } => {
                    let (value, end) = self.parse_list_item(lines, i, content, depth + 1)?;
                    items.push(value);
                    i = end;
                }
                _ => i += 1,
            }
        }

        if self.options.strict {
            if items.len() != count {
                return Err(Error::decode(
                    header_idx + 1,
                    format!(
                        "list count mismatch: expected {}, found {}",
                        count,
                        items.len()
                    ),
                ));
            }
            if let Some(j) = next_non_blank(lines, i) {
                if self.indent_level(lines[j]) > header_level {
                    if let LineClass::ListItem { .. } = classify(lines[j].trim()) {
                        return Err(Error::decode(
                            j + 1,
                            format!("list count mismatch: expected {}, found excess items", count),
                        ));
                    }
                }
            }
        }

        Ok((Value::Array(items), i))
    }

    /// Parses one `- ` item. `content` is the trimmed text after the dash.
    fn parse_list_item(
        &self,
        lines: &[&str],
        idx: usize,
        content: &str,
        depth: usize,
    ) -> Result<(Value, usize)> {
        if depth > MAX_DEPTH {
            return Err(Error::decode(idx + 1, "maximum nesting depth exceeded"));
        }

        let item_indent = indent_spaces(lines[idx]);

        if content.is_empty() {
            // Bare dash: the item is the following deeper block, or the
            // empty object when nothing deeper follows.
            return match next_non_blank(lines, idx + 1) {
                Some(j) if indent_spaces(lines[j]) > item_indent => {
                    self.parse_block(lines, idx + 1, depth + 1)
                }
                _ => Ok((Value::Object(ToonMap::new()), idx + 1)),
            };
        }

        // `- k1: v1, k2: v2` checked before the single-pair form so inline
        // objects decode back to the object that produced them.
        if let Some(obj) = self.parse_inline_pairs(content) {
            return Ok((Value::Object(obj), idx + 1));
        }

        if let Some(caps) = ITEM_KEY_VALUE_RE.captures(content) {
            let key = caps.get(1).map_or("", |m| m.as_str());
            let inline = caps.get(2).map_or("", |m| m.as_str()).trim();
            return self.parse_item_object(lines, idx, key, inline, item_indent, depth);
        }

        Ok((self.parse_scalar(content), idx + 1))
    }

    /// Inline object form: a comma-separated run of two or more
    /// `key: value` pairs. Returns `None` unless every piece is a pair.
    fn parse_inline_pairs(&self, content: &str) -> Option<ToonMap> {
        if !content.contains(',') {
            return None;
        }
        let pieces = split_delimited(content, Delimiter::Comma);
        if pieces.len() < 2 {
            return None;
        }

        let mut obj = ToonMap::with_capacity(pieces.len());
        for piece in &pieces {
            let caps = INLINE_PAIR_RE.captures(piece)?;
            let key = caps.get(1).map_or("", |m| m.as_str());
            let value = caps.get(2).map_or("", |m| m.as_str());
            obj.insert(key.to_string(), self.parse_scalar(value));
        }
        Some(obj)
    }

    /// A list-item object opened by `- key: value` or `- key:`, extended by
    /// continuation keys on deeper lines.
    fn parse_item_object(
        &self,
        lines: &[&str],
        idx: usize,
        key: &str,
        inline: &str,
        item_indent: usize,
        depth: usize,
    ) -> Result<(Value, usize)> {
        let mut obj = ToonMap::new();
        let mut next = idx + 1;

        if inline.is_empty() {
            // A container value of the dash-line key sits two levels below
            // the item; lines one level down are continuation keys of the
            // item itself.
            let continuation_indent = item_indent + self.options.indent;
            match next_non_blank(lines, next) {
                Some(j) if indent_spaces(lines[j]) > continuation_indent => {
                    let (value, end) = self.parse_block(lines, next, depth + 1)?;
                    obj.insert(key.to_string(), value);
                    next = end;
                }
                _ => {
                    obj.insert(key.to_string(), Value::Object(ToonMap::new()));
                }
            }
        } else {
            obj.insert(key.to_string(), self.parse_scalar(inline));
        }

        // Continuation keys: deeper `key: value` lines merge into the same
        // object until the block dedents or a sibling dash begins.
        while next < lines.len() {
            let trimmed = lines[next].trim();
            if trimmed.is_empty() {
                next += 1;
                continue;
            }
            let spaces = indent_spaces(lines[next]);
            if spaces <= item_indent {
                break;
            }

            match ITEM_KEY_VALUE_RE.captures(trimmed) {
                Some(caps) => {
                    let cont_key = caps.get(1).map_or("", |m| m.as_str());
                    let cont_inline = caps.get(2).map_or("", |m| m.as_str()).trim();
                    if cont_inline.is_empty() {
                        match next_non_blank(lines, next + 1) {
                            Some(j) if indent_spaces(lines[j]) > spaces => {
                                let (value, end) = self.parse_block(lines, next + 1, depth + 1)?;
                                obj.insert(cont_key.to_string(), value);
                                next = end;
                            }
                            _ => {
                                obj.insert(cont_key.to_string(), Value::Object(ToonMap::new()));
                                next += 1;
                            }
                        }
                    } else {
                        obj.insert(cont_key.to_string(), self.parse_scalar(cont_inline));
                        next += 1;
                    }
                }
                None => {
                    if self.options.strict {
                        return Err(Error::decode(
                            next + 1,
                            "expected 'key: value' in list item continuation",
                        ));
                    }
                    break;
                }
            }
        }

        Ok((Value::Object(obj), next))
    }

    /// Scalar parsing: keywords, quoted strings, numbers, literal text.
    fn parse_scalar(&self, raw: &str) -> Value {
        let s = raw.trim();
        if s.is_empty() {
            return Value::Null;
        }

        if s.eq_ignore_ascii_case("null") {
            return Value::Null;
        }
        if s.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if s.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }

        if is_quoted(s) {
            return Value::String(unquote(s));
        }

        if looks_numeric(s) {
            if s.contains('.') {
                if let Ok(f) = s.parse::<f64>() {
                    return Value::Number(Number::Float(f));
                }
            } else if let Ok(i) = s.parse::<i64>() {
                return Value::Number(Number::Integer(i));
            } else if let Ok(f) = s.parse::<f64>() {
                // Exponent forms and over-long digit runs fall back to float.
                return Value::Number(Number::Float(f));
            }
        }

        Value::String(s.to_string())
    }
}

/// Leading space count; tabs do not count toward indentation.
fn indent_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn next_non_blank(lines: &[&str], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&j| !lines[j].trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_default(input: &str) -> Value {
        Decoder::new(DecodeOptions::default()).decode(input).unwrap()
    }

    #[test]
    fn test_classify_priority() {
        assert!(matches!(
            classify("users[2,]{id,name}: rest"),
            LineClass::NamedArrayHeader { key: "users", .. }
        ));
        assert!(matches!(
            classify("[3|]: 1|2|3"),
            LineClass::BareArrayHeader { .. }
        ));
        assert!(matches!(
            classify("name: Alice"),
            LineClass::KeyValue { key: "name", .. }
        ));
        assert!(matches!(classify("- 42"), LineClass::ListItem { content: "42" }));
        assert!(matches!(classify("-"), LineClass::ListItem { content: "" }));
        assert!(matches!(classify("???"), LineClass::Unrecognized));
    }

    #[test]
    fn test_header_fields() {
        match classify("xs[#3|]{a,b}: tail") {
            LineClass::NamedArrayHeader { key, header } => {
                assert_eq!(key, "xs");
                assert_eq!(header.count, 3);
                assert_eq!(header.delimiter, Delimiter::Pipe);
                assert_eq!(header.columns.as_deref(), Some(&["a", "b"][..]));
                assert_eq!(header.inline, "tail");
            }
            other => panic!("unexpected class: {other:?}"),
        }
    }

    #[test]
    fn test_oversized_count_is_unrecognized() {
        assert!(matches!(
            classify("[99999999999999999999999]:"),
            LineClass::Unrecognized
        ));
    }

    #[test]
    fn test_scalar_parsing() {
        let d = Decoder::new(DecodeOptions::default());
        assert_eq!(d.parse_scalar("NULL"), Value::Null);
        assert_eq!(d.parse_scalar("True"), Value::Bool(true));
        assert_eq!(d.parse_scalar("42"), Value::Number(Number::Integer(42)));
        assert_eq!(d.parse_scalar("-2.5"), Value::Number(Number::Float(-2.5)));
        assert_eq!(d.parse_scalar("1e3"), Value::Number(Number::Float(1000.0)));
        assert_eq!(d.parse_scalar("\"42\""), Value::String("42".to_string()));
        assert_eq!(d.parse_scalar("plain"), Value::String("plain".to_string()));
    }

    #[test]
    fn test_blank_valued_key_is_empty_object() {
        let value = decode_default("a:\nb: 1");
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&Value::Object(ToonMap::new())));
        assert_eq!(obj.get("b").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn test_depth_cap() {
        let mut doc = String::new();
        for i in 0..200 {
            doc.push_str(&" ".repeat(i * 2));
            doc.push_str("k:\n");
        }
        let err = Decoder::new(DecodeOptions::default()).decode(&doc);
        assert!(matches!(err, Err(Error::Decode { .. })));
    }

    #[test]
    fn test_root_scalar_documents() {
        assert_eq!(decode_default("42"), Value::Number(Number::Integer(42)));
        assert_eq!(decode_default("hello world"), Value::String("hello world".to_string()));
        assert_eq!(decode_default("\"a: b\""), Value::String("a: b".to_string()));
    }
}
