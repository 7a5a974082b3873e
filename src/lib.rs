//! # toonify
//!
//! A bidirectional codec between JSON-like value trees and TOON
//! (Token-Oriented Object Notation), a compact line-oriented text format.
//!
//! ## What is TOON?
//!
//! TOON is a human-readable data format designed for embedding structured
//! data in text with a minimal character/token footprint, e.g. inside LLM
//! prompts. It stays exactly round-trippable to a conventional JSON-like
//! tree while dropping most of JSON's syntactic overhead:
//!
//! - Objects are `key: value` lines, nested by indentation
//! - Arrays of uniform flat objects print as tables, with the column names
//!   written once: `[2,]{id,name}:` followed by one row per element
//! - Scalar arrays print inline: `[3,]: 1,2,3`
//! - Strings are quoted only when they would otherwise be ambiguous
//!
//! ## Quick Start
//!
//! ```rust
//! use toonify::{decode, encode, toon};
//!
//! let value = toon!({
//!     "name": "Alice",
//!     "age": 30,
//!     "active": true
//! });
//!
//! let text = encode(&value).unwrap();
//! assert_eq!(text, "name: Alice\nage: 30\nactive: true");
//!
//! let back = decode(&text).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Tabular Arrays
//!
//! ```rust
//! use toonify::{encode, toon};
//!
//! let users = toon!([
//!     {"id": 1, "name": "Roni"},
//!     {"id": 2, "name": "Phpi"}
//! ]);
//! assert_eq!(encode(&users).unwrap(), "[2,]{id,name}:\n  1,Roni\n  2,Phpi");
//! ```
//!
//! ## JSON Interop
//!
//! ```rust
//! use toonify::{decode_to_json, encode_json, DecodeOptions};
//!
//! let toon = encode_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
//! let json = decode_to_json(&toon, &DecodeOptions::default()).unwrap();
//! assert_eq!(json, r#"{"name":"Alice","age":30}"#);
//! ```
//!
//! ## Extracting TOON from LLM Responses
//!
//! [`extract_toon_block`] locates a TOON payload inside markdown fences or
//! surrounding prose before decoding:
//!
//! ```rust
//! use toonify::{decode, extract_toon_block};
//!
//! let reply = "Sure!\n```toon\nname: Alice\n```";
//! let block = extract_toon_block(reply).unwrap();
//! assert!(decode(&block).is_ok());
//! ```
//!
//! ## Strict and Lenient Decoding
//!
//! Array headers declare their element counts. Strict mode (the default)
//! rejects any declared-vs-actual mismatch; lenient mode fills missing
//! fields with null and accepts short collections:
//!
//! ```rust
//! use toonify::{decode, decode_with_options, DecodeOptions};
//!
//! assert!(decode("[3,]: 1,2").is_err());
//!
//! let lenient = DecodeOptions::new().with_strict(false);
//! assert!(decode_with_options("[3,]: 1,2", &lenient).is_ok());
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod quote;
pub mod sniff;
pub mod value;

pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{Error, Result};
pub use map::ToonMap;
pub use options::{DecodeOptions, Delimiter, EncodeOptions};
pub use quote::{needs_quoting, quote, split_delimited, unquote};
pub use sniff::{detect_delimiter, extract_toon_block, looks_like_toon};
pub use value::{Number, Value};

use std::io;

/// Serializes a value tree to TOON text with default options.
///
/// # Examples
///
/// ```rust
/// use toonify::{encode, toon};
///
/// let toon = encode(&toon!({"x": 1, "y": 2})).unwrap();
/// assert_eq!(toon, "x: 1\ny: 2");
/// ```
///
/// # Errors
///
/// Returns [`Error::Encode`] when a top-level JSON-like string fails to
/// parse.
pub fn encode(value: &Value) -> Result<String> {
    encode_with_options(value, &EncodeOptions::default())
}

/// Serializes a value tree to TOON text with the given options.
///
/// # Examples
///
/// ```rust
/// use toonify::{encode_with_options, toon, Delimiter, EncodeOptions};
///
/// let opts = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
/// let toon = encode_with_options(&toon!(["a", "b"]), &opts).unwrap();
/// assert_eq!(toon, "[2|]: a|b");
/// ```
///
/// # Errors
///
/// Returns [`Error::Encode`] when a top-level JSON-like string fails to
/// parse.
pub fn encode_with_options(value: &Value, options: &EncodeOptions) -> Result<String> {
    Encoder::new(options.clone()).encode(value)
}

/// Parses JSON text and serializes the resulting tree to TOON with default
/// options.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the input is not valid JSON.
pub fn encode_json(json: &str) -> Result<String> {
    encode_json_with_options(json, &EncodeOptions::default())
}

/// Parses JSON text and serializes the resulting tree to TOON with the
/// given options.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the input is not valid JSON.
pub fn encode_json_with_options(json: &str, options: &EncodeOptions) -> Result<String> {
    Encoder::new(options.clone()).encode_json(json)
}

/// Parses TOON text into a value tree with default (strict) options.
///
/// # Examples
///
/// ```rust
/// use toonify::{decode, Value};
///
/// let value = decode("[2,]: 1,2").unwrap();
/// assert_eq!(value.as_array().map(Vec::len), Some(2));
/// ```
///
/// # Errors
///
/// Returns [`Error::Decode`] on empty input and, in strict mode, on any
/// declared-vs-actual count mismatch.
pub fn decode(toon: &str) -> Result<Value> {
    decode_with_options(toon, &DecodeOptions::default())
}

/// Parses TOON text into a value tree with the given options.
///
/// # Errors
///
/// Returns [`Error::Decode`] on empty input and, in strict mode, on any
/// declared-vs-actual count mismatch.
pub fn decode_with_options(toon: &str, options: &DecodeOptions) -> Result<Value> {
    Decoder::new(options.clone()).decode(toon)
}

/// Decodes TOON text and renders the value tree as compact JSON.
///
/// # Examples
///
/// ```rust
/// use toonify::{decode_to_json, DecodeOptions};
///
/// let json = decode_to_json("name: Alice", &DecodeOptions::default()).unwrap();
/// assert_eq!(json, r#"{"name":"Alice"}"#);
/// ```
///
/// # Errors
///
/// Returns [`Error::Decode`] for malformed TOON input.
pub fn decode_to_json(toon: &str, options: &DecodeOptions) -> Result<String> {
    let value = decode_with_options(toon, options)?;
    serde_json::to_string(&value).map_err(|e| Error::encode(format!("JSON rendering failed: {e}")))
}

/// Decodes TOON text and renders the value tree as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`Error::Decode`] for malformed TOON input.
pub fn decode_to_json_pretty(toon: &str, options: &DecodeOptions) -> Result<String> {
    let value = decode_with_options(toon, options)?;
    serde_json::to_string_pretty(&value)
        .map_err(|e| Error::encode(format!("JSON rendering failed: {e}")))
}

/// Serializes a value tree as TOON into a writer.
///
/// The writer collaborator only receives a finished UTF-8 text blob; its
/// own failures surface as [`Error::Io`].
///
/// # Examples
///
/// ```rust
/// use toonify::{encode_to_writer, toon, EncodeOptions};
///
/// let mut buffer = Vec::new();
/// encode_to_writer(&mut buffer, &toon!({"x": 1}), &EncodeOptions::default()).unwrap();
/// assert_eq!(buffer, b"x: 1");
/// ```
///
/// # Errors
///
/// Returns [`Error::Encode`] for unencodable input and [`Error::Io`] when
/// writing fails.
pub fn encode_to_writer<W>(mut writer: W, value: &Value, options: &EncodeOptions) -> Result<()>
where
    W: io::Write,
{
    let toon = encode_with_options(value, options)?;
    writer.write_all(toon.as_bytes())?;
    Ok(())
}

/// Reads a UTF-8 TOON document from a reader and decodes it.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use toonify::{decode_from_reader, DecodeOptions};
///
/// let cursor = Cursor::new(b"x: 1\ny: 2");
/// let value = decode_from_reader(cursor, &DecodeOptions::default()).unwrap();
/// assert_eq!(value.as_object().map(|o| o.len()), Some(2));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] when reading fails and [`Error::Decode`] for
/// malformed TOON input.
pub fn decode_from_reader<R>(mut reader: R, options: &DecodeOptions) -> Result<Value>
where
    R: io::Read,
{
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    decode_with_options(&text, options)
}
