//! Configuration for TOON encoding and decoding.
//!
//! Configuration is an explicit immutable value fixed when an
//! [`crate::Encoder`] or [`crate::Decoder`] is constructed; there are no
//! process-wide ambient defaults.
//!
//! - [`Delimiter`]: field delimiter for primitive and tabular arrays
//! - [`EncodeOptions`]: delimiter, indent width, length marker
//! - [`DecodeOptions`]: strict flag, indent width
//!
//! ## Examples
//!
//! ```rust
//! use toonify::{encode_with_options, toon, Delimiter, EncodeOptions};
//!
//! let opts = EncodeOptions::new()
//!     .with_delimiter(Delimiter::Pipe)
//!     .with_length_marker("#");
//! let toon = encode_with_options(&toon!([1, 2, 3]), &opts).unwrap();
//! assert_eq!(toon, "[#3|]: 1|2|3");
//! ```

use crate::{Error, Result};

/// Delimiter choice for TOON primitive and tabular arrays.
///
/// - **Comma**: default, most compact
/// - **Tab**: TSV-like output
/// - **Pipe**: readable when fields contain commas
///
/// The delimiter symbol is recorded in array headers (`[3|]: 1|2|3`), so a
/// decoder needs no out-of-band configuration to split rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Returns the string representation of this delimiter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }
}

impl TryFrom<char> for Delimiter {
    type Error = Error;

    /// Converts a raw delimiter character, rejecting anything outside the
    /// supported set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toonify::Delimiter;
    ///
    /// assert_eq!(Delimiter::try_from('|').unwrap(), Delimiter::Pipe);
    /// assert!(Delimiter::try_from(';').is_err());
    /// ```
    fn try_from(c: char) -> Result<Self> {
        match c {
            ',' => Ok(Delimiter::Comma),
            '\t' => Ok(Delimiter::Tab),
            '|' => Ok(Delimiter::Pipe),
            other => Err(Error::config(format!(
                "invalid delimiter {other:?}: use ',', '\\t' or '|'"
            ))),
        }
    }
}

/// Options controlling TOON output.
///
/// # Examples
///
/// ```rust
/// use toonify::{Delimiter, EncodeOptions};
///
/// let opts = EncodeOptions::new()
///     .with_delimiter(Delimiter::Tab)
///     .with_indent(4);
/// assert_eq!(opts.indent, 4);
/// ```
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Field delimiter for primitive and tabular arrays.
    pub delimiter: Delimiter,
    /// Spaces per indentation level.
    pub indent: usize,
    /// Prefix inserted before array element counts, e.g. `#` for `[#3]:`.
    pub length_marker: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            delimiter: Delimiter::default(),
            indent: 2,
            length_marker: String::new(),
        }
    }
}

impl EncodeOptions {
    /// Creates default options (comma delimiter, 2-space indent, no marker).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delimiter for primitive and tabular arrays.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the indentation width (spaces per level). Default is 2.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the length-marker prefix written before array counts.
    #[must_use]
    pub fn with_length_marker(mut self, marker: impl Into<String>) -> Self {
        self.length_marker = marker.into();
        self
    }
}

/// Options controlling TOON decoding.
///
/// Strict mode (the default) raises [`Error::Decode`] on any
/// declared-vs-actual count mismatch; lenient mode substitutes `null` for
/// missing fields and accepts short arrays and rows.
///
/// # Examples
///
/// ```rust
/// use toonify::{decode_with_options, DecodeOptions};
///
/// let lenient = DecodeOptions::new().with_strict(false);
/// let value = decode_with_options("[3]: 1,2", &lenient).unwrap();
/// assert_eq!(value.as_array().map(Vec::len), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Raise on count/key mismatches instead of best-effort recovery.
    pub strict: bool,
    /// Spaces per indentation level expected in the input.
    pub indent: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            strict: true,
            indent: 2,
        }
    }
}

impl DecodeOptions {
    /// Creates default options (strict, 2-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables strict count validation. Default is strict.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the indentation width (spaces per level). Default is 2.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
