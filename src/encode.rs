//! TOON encoding.
//!
//! [`Encoder`] serializes a [`Value`] tree into TOON text. The encoder
//! applies the format's space-saving layouts by classifying every array at
//! write time:
//!
//! - **Tabular**: uniform flat objects print their column names once, then
//!   one delimiter-joined row per element
//! - **Primitive**: scalar arrays print inline after the header
//! - **List**: everything else prints as `- `-prefixed items
//! - **Empty**: header only
//!
//! Encoding is a pure function of the value and the options; the encoder
//! holds no mutable state.
//!
//! ```rust
//! use toonify::{encode, toon};
//!
//! let value = toon!({
//!     "name": "Alice",
//!     "tags": ["admin", "ops"]
//! });
//! assert_eq!(encode(&value).unwrap(), "name: Alice\ntags[2,]: admin,ops");
//! ```

use crate::quote::{needs_quoting, quote};
use crate::{EncodeOptions, Error, Number, Result, ToonMap, Value};

/// Derived array classification, recomputed at encode time and never stored.
enum ArrayShape<'a> {
    Empty,
    Tabular(Vec<&'a str>),
    Primitive,
    List,
}

/// The TOON encoder.
///
/// Holds immutable configuration fixed at construction; independent
/// [`Encoder::encode`] calls may run concurrently.
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Encoder { options }
    }

    /// Serializes a value tree to TOON text.
    ///
    /// A top-level string that is recognized as JSON-like text is parsed
    /// into a tree first; a string announcing a JSON container (`{` or `[`)
    /// that fails to parse is an [`Error::Encode`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] for malformed JSON-like input.
    pub fn encode(&self, value: &Value) -> Result<String> {
        if let Value::String(s) = value {
            if let Some(parsed) = parse_json_like(s)? {
                return Ok(self.encode_value(&parsed, 0));
            }
        }
        Ok(self.encode_value(value, 0))
    }

    /// Parses JSON text and serializes the resulting tree to TOON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `json` is not valid JSON.
    pub fn encode_json(&self, json: &str) -> Result<String> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::encode(format!("invalid JSON: {e}")))?;
        Ok(self.encode_value(&value, 0))
    }

    fn indent_str(&self, level: usize) -> String {
        " ".repeat(level * self.options.indent)
    }

    fn encode_value(&self, value: &Value, level: usize) -> String {
        match value {
            Value::Array(arr) => self.encode_array(None, arr, level),
            Value::Object(obj) => self.encode_object(obj, level),
            scalar => self.scalar_text(scalar),
        }
    }

    fn scalar_text(&self, value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(Number::Float(f)) if !f.is_finite() => "null".to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => quote(s, self.options.delimiter),
            // Containers never reach here; callers route them to the
            // object/array writers.
            other => self.encode_value(other, 0),
        }
    }

    /// Scalar rendering inside inline list objects, where `, ` separates
    /// the pairs regardless of the active delimiter.
    fn scalar_text_inline(&self, value: &Value) -> String {
        if let Value::String(s) = value {
            if s.contains(',') && !needs_quoting(s, self.options.delimiter) {
                return format!("\"{}\"", crate::quote::escape(s));
            }
        }
        self.scalar_text(value)
    }

    fn encode_object(&self, obj: &ToonMap, level: usize) -> String {
        let indent = self.indent_str(level);
        let mut lines = Vec::with_capacity(obj.len());

        for (key, value) in obj.iter() {
            match value {
                Value::Array(arr) => {
                    lines.push(self.encode_array(Some(key), arr, level));
                }
                Value::Object(nested) => {
                    if nested.is_empty() {
                        lines.push(format!("{indent}{key}:"));
                    } else {
                        lines.push(format!("{indent}{key}:"));
                        lines.push(self.encode_object(nested, level + 1));
                    }
                }
                scalar => {
                    lines.push(format!("{indent}{key}: {}", self.scalar_text(scalar)));
                }
            }
        }

        lines.join("\n")
    }

    fn encode_array(&self, key: Option<&str>, arr: &[Value], level: usize) -> String {
        match array_shape(arr) {
            ArrayShape::Empty => self.encode_empty_array(key, level),
            ArrayShape::Tabular(columns) => self.encode_tabular_array(key, arr, &columns, level),
            ArrayShape::Primitive => self.encode_primitive_array(key, arr, level),
            ArrayShape::List => self.encode_list_array(key, arr, level),
        }
    }

    fn header_prefix(&self, key: Option<&str>, level: usize) -> String {
        match key {
            Some(name) => format!("{}{}", self.indent_str(level), name),
            None => self.indent_str(level),
        }
    }

    fn encode_empty_array(&self, key: Option<&str>, level: usize) -> String {
        format!(
            "{}[{}0]:",
            self.header_prefix(key, level),
            self.options.length_marker
        )
    }

    fn encode_primitive_array(&self, key: Option<&str>, arr: &[Value], level: usize) -> String {
        let values: Vec<String> = arr.iter().map(|v| self.scalar_text(v)).collect();
        format!(
            "{}[{}{}{}]: {}",
            self.header_prefix(key, level),
            self.options.length_marker,
            arr.len(),
            self.options.delimiter.as_str(),
            values.join(self.options.delimiter.as_str())
        )
    }

    fn encode_tabular_array(
        &self,
        key: Option<&str>,
        arr: &[Value],
        columns: &[&str],
        level: usize,
    ) -> String {
        // Column names are always comma-joined; the delimiter symbol in the
        // header describes the rows, not the column list.
        let mut lines = vec![format!(
            "{}[{}{}{}]{{{}}}:",
            self.header_prefix(key, level),
            self.options.length_marker,
            arr.len(),
            self.options.delimiter.as_str(),
            columns.join(",")
        )];

        let row_indent = self.indent_str(level + 1);
        for element in arr {
            let obj = match element {
                Value::Object(obj) => obj,
                _ => continue,
            };
            let cells: Vec<String> = columns
                .iter()
                .map(|col| self.scalar_text(obj.get(col).unwrap_or(&Value::Null)))
                .collect();
            lines.push(format!(
                "{row_indent}{}",
                cells.join(self.options.delimiter.as_str())
            ));
        }

        lines.join("\n")
    }

    fn encode_list_array(&self, key: Option<&str>, arr: &[Value], level: usize) -> String {
        // Named list headers carry no delimiter symbol: the symbol describes
        // inline values or rows, which list bodies do not have. Bare list
        // headers keep it for sniffability at the document root.
        let header = match key {
            Some(_) => format!(
                "{}[{}{}]:",
                self.header_prefix(key, level),
                self.options.length_marker,
                arr.len()
            ),
            None => format!(
                "{}[{}{}{}]:",
                self.header_prefix(key, level),
                self.options.length_marker,
                arr.len(),
                self.options.delimiter.as_str()
            ),
        };

        let mut lines = vec![header];
        for item in arr {
            lines.push(self.encode_list_item(item, level + 1));
        }
        lines.join("\n")
    }

    fn encode_list_item(&self, item: &Value, level: usize) -> String {
        let indent = self.indent_str(level);
        match item {
            Value::Object(obj) if !obj.is_empty() => {
                let flat = obj.values().all(Value::is_scalar);
                if flat && obj.len() <= 5 {
                    self.encode_inline_list_object(obj, &indent)
                } else {
                    self.encode_block_list_object(obj, level, &indent)
                }
            }
            Value::Object(_) => format!("{indent}-"),
            Value::Array(_) => {
                format!("{indent}-\n{}", self.encode_value(item, level + 1))
            }
            scalar => format!("{indent}- {}", self.scalar_text(scalar)),
        }
    }

    fn encode_inline_list_object(&self, obj: &ToonMap, indent: &str) -> String {
        let parts: Vec<String> = obj
            .iter()
            .map(|(k, v)| format!("{k}: {}", self.scalar_text_inline(v)))
            .collect();
        format!("{indent}- {}", parts.join(", "))
    }

    /// Multi-line list object: first key rides the dash line, the rest are
    /// continuation lines one level deeper, container values two deeper.
    fn encode_block_list_object(&self, obj: &ToonMap, level: usize, indent: &str) -> String {
        let continuation_indent = self.indent_str(level + 1);
        let mut out = String::new();

        for (i, (key, value)) in obj.iter().enumerate() {
            let (prefix, lead) = if i == 0 {
                (format!("{indent}- "), "")
            } else {
                (continuation_indent.clone(), "\n")
            };

            match value {
                Value::Array(_) | Value::Object(_) => {
                    let block = self.encode_value(value, level + 2);
                    if block.is_empty() {
                        // Empty nested object: the blank-valued key line is
                        // its entire wire form.
                        out.push_str(&format!("{lead}{prefix}{key}:"));
                    } else {
                        out.push_str(&format!("{lead}{prefix}{key}:\n{block}"));
                    }
                }
                scalar => {
                    out.push_str(&format!("{lead}{prefix}{key}: {}", self.scalar_text(scalar)));
                }
            }
        }

        out
    }
}

/// Classifies an array for encoding. Tabular requires uniform flat objects
/// sharing one ordered key set; primitive requires all scalars.
fn array_shape(arr: &[Value]) -> ArrayShape<'_> {
    if arr.is_empty() {
        return ArrayShape::Empty;
    }

    if let Value::Object(first) = &arr[0] {
        let columns: Vec<&str> = first.keys().map(String::as_str).collect();
        let uniform = !columns.is_empty()
            && arr.iter().all(|element| match element {
                Value::Object(obj) => {
                    obj.len() == columns.len()
                        && obj.keys().map(String::as_str).eq(columns.iter().copied())
                        && obj.values().all(Value::is_scalar)
                }
                _ => false,
            });
        if uniform {
            return ArrayShape::Tabular(columns);
        }
    }

    if arr.iter().all(Value::is_scalar) {
        ArrayShape::Primitive
    } else {
        ArrayShape::List
    }
}

/// Detects and parses JSON-like top-level strings. A string opening a JSON
/// container must parse; other strings are tried silently.
fn parse_json_like(s: &str) -> Result<Option<Value>> {
    let trimmed = s.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| Error::encode(format!("invalid JSON: {e}")))?;
        return Ok(Some(value));
    }
    Ok(serde_json::from_str(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    fn encode_default(value: &Value) -> String {
        Encoder::new(EncodeOptions::default()).encode(value).unwrap()
    }

    #[test]
    fn test_scalar_roots() {
        assert_eq!(encode_default(&Value::Null), "null");
        assert_eq!(encode_default(&toon!(true)), "true");
        assert_eq!(encode_default(&toon!(42)), "42");
        assert_eq!(encode_default(&toon!("plain")), "plain");
    }

    #[test]
    fn test_non_finite_numbers_collapse_to_null() {
        assert_eq!(encode_default(&Value::from(f64::NAN)), "null");
        assert_eq!(encode_default(&Value::from(f64::INFINITY)), "null");
    }

    #[test]
    fn test_object_preserves_key_order() {
        let value = toon!({"name": "Alice", "age": 30, "active": true});
        assert_eq!(
            encode_default(&value),
            "name: Alice\nage: 30\nactive: true"
        );
    }

    #[test]
    fn test_named_array_forms() {
        let value = toon!({"tags": ["a", "b"], "rows": [{"id": 1}, {"id": 2}], "misc": [1, {"x": 2}]});
        let toon = encode_default(&value);
        assert_eq!(
            toon,
            "tags[2,]: a,b\nrows[2,]{id}:\n  1\n  2\nmisc[2]:\n  - 1\n  - x: 2"
        );
    }

    #[test]
    fn test_empty_array_named_and_bare() {
        assert_eq!(encode_default(&toon!([])), "[0]:");
        assert_eq!(encode_default(&toon!({"xs": []})), "xs[0]:");
    }

    #[test]
    fn test_list_item_block_object() {
        let value = toon!([{"a": 1, "b": 2, "c": 3, "d": 4, "e": 5, "f": 6}]);
        let toon = encode_default(&value);
        assert_eq!(
            toon,
            "[1,]:\n  - a: 1\n    b: 2\n    c: 3\n    d: 4\n    e: 5\n    f: 6"
        );
    }

    #[test]
    fn test_list_item_nested_container() {
        let value = toon!([{"name": "n", "tags": [1, 2]}]);
        let toon = encode_default(&value);
        assert_eq!(toon, "[1,]:\n  - name: n\n    tags:\n      [2,]: 1,2");
    }

    #[test]
    fn test_json_like_top_level_string() {
        let value = Value::String(r#"{"a": 1}"#.to_string());
        assert_eq!(encode_default(&value), "a: 1");

        let bad = Value::String("{not json".to_string());
        let err = Encoder::new(EncodeOptions::default()).encode(&bad);
        assert!(matches!(err, Err(Error::Encode(_))));
    }

    #[test]
    fn test_encode_json_entry_point() {
        let encoder = Encoder::new(EncodeOptions::default());
        let toon = encoder.encode_json(r#"{"name": "Alice"}"#).unwrap();
        assert_eq!(toon, "name: Alice");
        assert!(encoder.encode_json("nope").is_err());
    }
}
