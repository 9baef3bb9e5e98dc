//! Error types for PYON encoding, decoding, and conversion.
//!
//! Everything in this crate reports failure through the single [`Error`]
//! enum. The variants fall into three families:
//!
//! - **Decode errors**: invalid literal syntax, unexpected end of input,
//!   unhashable keys, integer literals outside `i64`, and the nesting-depth
//!   guard. [`Error::is_decode`] identifies this family; `decode_row` and
//!   `normalize` recover from it automatically.
//! - **Conversion errors**: `UnsupportedType` from the strict JSON converter
//!   and `IncomparableKeys` from the recursive key sort. Never recovered
//!   internally.
//! - **Custom**: the channel Serde serializers/deserializers report through.
//!
//! ## Examples
//!
//! ```rust
//! use serde_pyon::{decode, Error};
//!
//! let result = decode("{'open': [1, 2");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     eprintln!("Parse error: {}", err);
//!     assert!(err.is_decode());
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during PYON encoding,
/// decoding, or conversion.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Syntax error during decoding, with line and column information
    #[error("syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// Unexpected end of input
    #[error("unexpected end of input at line {line}, column {col}: expected {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// A list, set, or dict appeared where a dict key or set member is required
    #[error("unhashable type: '{type_name}'")]
    Unhashable { type_name: &'static str },

    /// The nesting-depth guard tripped during decoding
    #[error("nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    /// An integer literal outside the representable `i64` range
    #[error("integer literal out of range: {literal}")]
    IntegerOverflow { literal: String },

    /// A value with no JSON representation was passed to the strict converter
    #[error("unsupported type for JSON: {0}")]
    UnsupportedType(String),

    /// Recursive key sort encountered mutually incomparable key types
    #[error("'<' not supported between instances of '{left}' and '{right}'")]
    IncomparableKeys {
        left: &'static str,
        right: &'static str,
    },

    /// Custom error raised through the Serde error traits
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::Error;
    ///
    /// let err = Error::syntax(1, 5, "unexpected character '@'");
    /// assert!(err.to_string().contains("line 1"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.into(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: impl Into<String>) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.into(),
        }
    }

    /// Creates an unsupported type error for values the strict JSON
    /// converter cannot express.
    pub fn unsupported_type(msg: impl Into<String>) -> Self {
        Error::UnsupportedType(msg.into())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for the decode family of errors: the failures `decode`
    /// itself can produce.
    ///
    /// `decode_row` and `normalize` fall back to the raw input text exactly
    /// when the underlying failure is in this family.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(
            self,
            Error::Syntax { .. }
                | Error::UnexpectedEof { .. }
                | Error::Unhashable { .. }
                | Error::NestingTooDeep { .. }
                | Error::IntegerOverflow { .. }
        )
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
