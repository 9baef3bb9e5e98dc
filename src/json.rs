//! Conversion from PYON values to JSON text.
//!
//! JSON is strictly smaller than PYON: it has no tuples, no sets, no
//! non-string keys, and no non-finite floats. This module offers two ways
//! across that gap:
//!
//! - [`to_json`] walks a decoded [`Value`] and produces compact JSON,
//!   stringifying dict keys and rejecting what JSON cannot express
//! - [`to_json_fast`] is a textual quote swap for callers that already
//!   know their input is JSON-shaped apart from the quote style
//!
//! ```rust
//! use serde_pyon::{decode, to_json};
//!
//! let value = decode("{1: 'a', 'b': (2, 3)}").unwrap();
//! assert_eq!(to_json(&value).unwrap(), r#"{"1":"a","b":[2,3]}"#);
//! ```

use crate::{Error, HashableValue, Result, Value};

/// Converts a value to compact JSON text.
///
/// Tuples flatten to JSON arrays. Dict keys stringify the way Python's
/// `str()` spells them: strings stay bare, booleans become `True`/`False`,
/// `None` stays `None`, numbers keep their literal form, and tuple keys
/// become their literal text (for example `(1, 2)`). Distinct keys that
/// stringify identically collapse last-write-wins.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for sets and for non-finite floats
/// in value position; JSON has no representation for either.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::{decode, to_json};
///
/// let value = decode("{True: 1, None: 2}").unwrap();
/// assert_eq!(to_json(&value).unwrap(), r#"{"True":1,"None":2}"#);
///
/// let value = decode("{1, 2, 3}").unwrap();
/// assert!(to_json(&value).is_err());
/// ```
pub fn to_json(value: &Value) -> Result<String> {
    let json = to_json_value(value)?;
    serde_json::to_string(&json).map_err(Error::custom)
}

/// Rewrites PYON text to JSON by swapping every single quote for a double
/// quote.
///
/// This is a blind textual replacement. It is only correct when the input
/// contains no apostrophes or quotes inside string content and no scalars
/// JSON cannot parse (`True`, `None`, tuples, sets). Numeric payloads with
/// plain identifier-like strings, the common case in tabular data, qualify.
/// Everything else belongs on [`to_json`].
///
/// # Examples
///
/// ```rust
/// use serde_pyon::to_json_fast;
///
/// assert_eq!(to_json_fast("{'a': 1}"), r#"{"a": 1}"#);
/// ```
#[must_use]
pub fn to_json_fast(text: &str) -> String {
    text.replace('\'', "\"")
}

/// `str()`-style key coercion. Always a plain string, never quoted JSON.
fn json_key(key: &HashableValue) -> String {
    match key {
        HashableValue::Str(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_json_value(value: &Value) -> Result<serde_json::Value> {
    match value {
        Value::None => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Int(i) => Ok(serde_json::Value::from(*i)),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                Error::unsupported_type(format!("non-finite float {}", Value::Float(*f)))
            }),
        Value::Str(s) => Ok(serde_json::Value::String(s.clone())),
        Value::List(items) | Value::Tuple(items) => items
            .iter()
            .map(to_json_value)
            .collect::<Result<Vec<_>>>()
            .map(serde_json::Value::Array),
        Value::Set(_) => Err(Error::unsupported_type("set")),
        Value::Dict(dict) => {
            let mut map = serde_json::Map::with_capacity(dict.len());
            for (key, val) in dict.iter() {
                map.insert(json_key(key), to_json_value(val)?);
            }
            Ok(serde_json::Value::Object(map))
        }
    }
}
