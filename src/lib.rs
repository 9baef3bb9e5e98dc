//! # serde_pyon
//!
//! A Serde-compatible codec for PYON (Python Object Notation), the literal
//! text Python's `repr()` prints for built-in values.
//!
//! ## What is PYON?
//!
//! Python services constantly log container reprs into CSV columns, message
//! payloads, and line-oriented telemetry: `{'region': 'us-east', 'shards':
//! (3, 5)}`. That text is almost JSON, but not quite: single quotes,
//! `True`/`False`/`None`, tuples, sets, and dict keys that are not strings.
//! PYON treats that notation as a first-class format: a precise grammar, a
//! safe decoder, a byte-faithful encoder, and bridges to JSON.
//!
//! ## Key Features
//!
//! - **Full literal grammar**: dicts, lists, tuples (including `(1,)` and
//!   `()`), sets (`set()` for empty), either quote style, `inf`/`nan`
//! - **Safe by construction**: the decoder parses literals only; it never
//!   resolves names or calls anything, so untrusted input cannot run code
//! - **Round-trip faithful**: insertion order, float bit patterns, and the
//!   tuple/list distinction all survive `encode(decode(text))`
//! - **Serde Compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`, tuple-keyed maps included
//! - **JSON bridges**: a strict converter that stringifies keys and rejects
//!   the inexpressible, and a documented fast path for known-clean text
//! - **Canonicalization**: [`normalize`] makes equal values byte-identical
//!   for cell-level comparison
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_pyon = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Decoding logged text
//!
//! ```rust
//! use serde_pyon::{decode, Value};
//!
//! let value = decode("{'region': 'us-east', 'shards': (3, 5), 'ok': True}").unwrap();
//! let dict = value.as_dict().unwrap();
//! assert_eq!(dict.get_str("region").and_then(|v| v.as_str()), Some("us-east"));
//! assert!(dict.get_str("shards").map_or(false, |v| v.is_tuple()));
//! ```
//!
//! ### Basic Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_pyon::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "{'id': 123, 'name': 'Alice', 'active': True}");
//!
//! let user_back: User = from_str(&text).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Dynamic Values with the pyon! Macro
//!
//! ```rust
//! use serde_pyon::{pyon, Value};
//!
//! let data = pyon!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["ops", "py"]
//! });
//!
//! if let Value::Dict(dict) = data {
//!     assert_eq!(dict.get_str("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ### Canonicalizing cells
//!
//! ```rust
//! use serde_pyon::normalize;
//!
//! // key order and spacing collapse to one canonical form
//! assert_eq!(normalize("{'b': 1, 'a': 2}").unwrap(), "{'a': 2, 'b': 1}");
//! assert_eq!(normalize("{'a':2,'b':1}").unwrap(), "{'a': 2, 'b': 1}");
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Decoding**: O(n) single-pass with one character of lookahead
//! - **Encoding**: O(n) over the value tree
//! - **Lookup**: dicts and sets are index-ordered hash containers, so key
//!   access is O(1) while iteration stays in insertion order
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Literal parsing only; decoding cannot execute anything
//! - Recursion bounded at 128 nesting levels, reported as an error
//! - No panics in the public API (the [`pyon!`] macro documents its one
//!   panic on unhashable keys)
//!
//! ## Format Reference
//!
//! The complete text format is documented in the [`format`] module.

pub mod de;
pub mod error;
pub mod format;
pub mod json;
pub mod macros;
pub mod map;
pub mod normalize;
pub mod options;
pub mod ser;
pub mod value;

pub use de::{decode, decode_row, from_value};
pub use error::{Error, Result};
pub use json::{to_json, to_json_fast};
pub use map::Dict;
pub use normalize::{normalize, sort_keys_recursive};
pub use options::EncodeOptions;
pub use ser::{encode, encode_with_options, remove_spaces, to_value, ValueSerializer};
pub use value::{HashableValue, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize any `T: Serialize` to a PYON string.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "{'x': 1, 'y': 2}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (for example a map
/// with unhashable keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(encode(&to_value(value)?))
}

/// Serialize any `T: Serialize` to a pretty-printed PYON string.
///
/// Uses 4-space indentation and the default 160-column width; groupings
/// that fit stay on one line.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::to_string_pretty;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let text = to_string_pretty(&point).unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::pretty())
}

/// Serialize any `T: Serialize` to a PYON string with custom layout options.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::{to_string_with_options, EncodeOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let options = EncodeOptions::new().with_indent(2).with_width(10);
/// let text = to_string_with_options(&point, &options).unwrap();
/// assert_eq!(text, "{\n  'x': 1,\n  'y': 2\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(encode_with_options(&to_value(value)?, options))
}

/// Deserialize an instance of type `T` from a string of PYON text.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("{'x': 1, 'y': 2}").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid PYON or cannot be
/// deserialized to type `T`. Syntax errors carry line and column
/// information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        assert_eq!(text, "{'x': 1, 'y': 2}");
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let text = to_string(&user).unwrap();
        assert_eq!(
            text,
            "{'id': 123, 'name': 'Alice', 'active': True, 'tags': ['admin', 'user']}"
        );
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_pretty_printing() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let text = to_string_pretty(&user).unwrap();
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_to_value() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();

        match value {
            Value::Dict(dict) => {
                assert_eq!(dict.get_str("x"), Some(&Value::Int(1)));
                assert_eq!(dict.get_str("y"), Some(&Value::Int(2)));
            }
            _ => panic!("Expected dict"),
        }
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        assert_eq!(text, "[1, 2, 3, 4, 5]");
        let numbers_back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_decode_dynamic() {
        let value = decode("{'pair': (1, 2), 'seen': {True}}").unwrap();
        let dict = value.as_dict().unwrap();
        assert!(dict.get_str("pair").map_or(false, |v| v.is_tuple()));
        assert!(dict.get_str("seen").map_or(false, |v| v.is_set()));
    }
}
