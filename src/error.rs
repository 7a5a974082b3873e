//! Error types for TOON encoding and decoding.
//!
//! The codec is a pure transform: every failure surfaces immediately to the
//! caller, there is no internal retry or partial-result recovery. Lenient
//! (non-strict) decoding is the sanctioned best-effort mode and is expressed
//! through [`crate::DecodeOptions`], not through error recovery.
//!
//! ## Error Categories
//!
//! - [`Error::Config`]: invalid configuration at construction time
//! - [`Error::Encode`]: a value or JSON-like input that cannot be serialized
//! - [`Error::Decode`]: malformed TOON input, with the offending line number
//! - [`Error::Io`]: reader/writer collaborator failures

use thiserror::Error;

/// Represents all possible errors produced by the TOON codec.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration, e.g. a delimiter outside `,` / tab / `|`.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Encoding failure, e.g. input text that claims to be JSON but is not.
    #[error("encoding failed: {0}")]
    Encode(String),

    /// Decoding failure with the 1-based line where it was detected.
    /// Line 0 means the failure is not tied to a specific line (empty input).
    #[error("decoding failed at line {line}: {msg}")]
    Decode { line: usize, msg: String },

    /// IO error from a reader or writer collaborator.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a configuration error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toonify::Error;
    ///
    /// let err = Error::config("delimiter must be ',', tab or '|'");
    /// assert!(err.to_string().contains("invalid configuration"));
    /// ```
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Creates an encoding error.
    pub fn encode(msg: impl Into<String>) -> Self {
        Error::Encode(msg.into())
    }

    /// Creates a decoding error tied to a 1-based source line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toonify::Error;
    ///
    /// let err = Error::decode(3, "array length mismatch: expected 2, found 1");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn decode(line: usize, msg: impl Into<String>) -> Self {
        Error::Decode {
            line,
            msg: msg.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
